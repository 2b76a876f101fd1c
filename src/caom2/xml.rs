//! XML serialization of observation records.
//!
//! One record per file, written with an XML declaration and two-space
//! indentation so archived records stay diffable.

use std::fs;
use std::io::Write;

use camino::Utf8Path;
use quick_xml::se::Serializer;
use serde::Serialize;

use crate::caom2::Observation;
use crate::ingest_errors::IngestionError;

const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";

/// Serialize a record to its XML document text.
pub fn to_xml_string(observation: &Observation) -> Result<String, IngestionError> {
    let mut body = String::new();
    let mut serializer = Serializer::with_root(&mut body, Some("observation"))
        .map_err(IngestionError::XmlWrite)?;
    serializer.indent(' ', 2);
    observation.serialize(serializer)?;

    let mut document = String::with_capacity(XML_DECLARATION.len() + body.len() + 1);
    document.push_str(XML_DECLARATION);
    document.push_str(&body);
    document.push('\n');
    Ok(document)
}

/// Reads persisted observation records.
#[derive(Debug, Default)]
pub struct ObservationReader;

impl ObservationReader {
    pub fn new() -> Self {
        ObservationReader
    }

    pub fn read(&self, path: &Utf8Path) -> Result<Observation, IngestionError> {
        let xml = fs::read_to_string(path)?;
        self.read_str(&xml)
    }

    pub fn read_str(&self, xml: &str) -> Result<Observation, IngestionError> {
        Ok(quick_xml::de::from_str(xml)?)
    }
}

/// Writes observation records to any destination stream.
#[derive(Debug, Default)]
pub struct ObservationWriter;

impl ObservationWriter {
    pub fn new() -> Self {
        ObservationWriter
    }

    pub fn write<W: Write>(
        &self,
        observation: &Observation,
        destination: &mut W,
    ) -> Result<(), IngestionError> {
        let document = to_xml_string(observation)?;
        destination.write_all(document.as_bytes())?;
        Ok(())
    }
}
