//! Ground-truth deployment table loading.
//!
//! The table is a CSV export of the testbed inventory with (at least) the
//! columns below; any other column is ignored.
//!
//! ```text
//! evb1000,NodeId,Coordinates
//! 00:00:00:00:00:00:11:0c,1,"[0.0, 0.0]"
//! 00:00:00:00:00:00:19:15,2,"[3.0, 4.0]"
//! ```

use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::analyzer::{NodeId, ShortAddr};
use crate::common::Point;
use crate::error::{AnalyzerError, Result};

#[derive(Debug, Deserialize)]
struct DeploymentRow {
    #[serde(rename = "evb1000")]
    device_id: String,
    #[serde(rename = "NodeId")]
    node_id: String,
    #[serde(rename = "Coordinates", default)]
    coordinates: String,
}

/// Node inventory with ground-truth positions, keyed for log lookups.
#[derive(Debug, Default, Clone)]
pub struct Deployment {
    id_by_addr: HashMap<ShortAddr, NodeId>,
    /// `None` marks a node listed with an unparseable position.
    coord_by_id: HashMap<NodeId, Option<Point>>,
}

impl Deployment {
    /// Load and parse a deployment table from a file.
    ///
    /// # Parameters
    ///
    /// * `path` - Path to the deployment CSV
    ///
    /// # Returns
    ///
    /// The parsed deployment, or an error if the file cannot be read or is
    /// not a well-formed CSV with the expected columns. Malformed coordinate
    /// strings are not an error.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| AnalyzerError::file_read(path, e))?;
        let deployment = Self::from_reader(file)?;
        log::info!(
            "Loaded {} nodes from deployment {}",
            deployment.coord_by_id.len(),
            path.display()
        );
        Ok(deployment)
    }

    pub fn from_reader<R: Read>(rdr: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::Headers).from_reader(rdr);

        let mut deployment = Deployment::default();
        for row in reader.deserialize() {
            let row: DeploymentRow = row?;
            let node_id = NodeId::new(row.node_id.trim());
            let coordinates = parse_coordinates(&row.coordinates);
            log::debug!("Node {} at {:?}", node_id, coordinates);
            if coordinates.is_none() {
                log::warn!("Malformed coordinates {:?} for node {}", row.coordinates, node_id);
            }

            deployment.insert(ShortAddr::from_device_id(row.device_id.trim()), node_id, coordinates);
        }
        Ok(deployment)
    }

    /// Register a node. Later entries for the same address or node replace
    /// earlier ones.
    pub fn insert(&mut self, addr: ShortAddr, node_id: NodeId, coordinates: Option<Point>) {
        self.id_by_addr.insert(addr, node_id.clone());
        self.coord_by_id.insert(node_id, coordinates);
    }

    pub fn node_for(&self, addr: &ShortAddr) -> Option<&NodeId> {
        self.id_by_addr.get(addr)
    }

    /// Ground-truth position of a node, if it is known and well-formed.
    pub fn coordinates(&self, node_id: &NodeId) -> Option<Point> {
        self.coord_by_id.get(node_id).copied().flatten()
    }

    pub fn len(&self) -> usize {
        self.coord_by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coord_by_id.is_empty()
    }
}

/// Parse a bracketed coordinate pair such as `[1.5, -2]`.
///
/// Brackets and spaces are stripped before splitting on commas; anything
/// other than exactly two floats gives `None`.
pub fn parse_coordinates(raw: &str) -> Option<Point> {
    let cleaned: String = raw.chars().filter(|c| !matches!(c, '[' | ']' | ' ')).collect();
    let values = cleaned
        .split(',')
        .map(str::parse::<f64>)
        .collect::<std::result::Result<Vec<_>, _>>()
        .ok()?;

    match values.as_slice() {
        [x, y] => Some(Point::new(*x, *y)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "evb1000,NodeId,Coordinates,Room\n\
                         00:00:00:00:00:00:11:0c,1,\"[0.0, 0.0]\",lab\n\
                         00:00:00:00:00:00:19:15,2,\"[3.0, 4.0]\",lab\n\
                         00:00:00:00:00:00:1a:0b,3,\"[n/a]\",hall\n";

    #[test]
    fn parses_coordinate_pairs() {
        assert_eq!(parse_coordinates("[1.5, -2]"), Some(Point::new(1.5, -2.0)));
        assert_eq!(parse_coordinates("[ 10 ,20.25 ]"), Some(Point::new(10.0, 20.25)));
    }

    #[test]
    fn malformed_coordinates_are_absent() {
        assert_eq!(parse_coordinates(""), None);
        assert_eq!(parse_coordinates("[]"), None);
        assert_eq!(parse_coordinates("[1.0]"), None);
        assert_eq!(parse_coordinates("[1.0, 2.0, 3.0]"), None);
        assert_eq!(parse_coordinates("[a, 2.0]"), None);
    }

    #[test]
    fn loads_table() {
        let deployment = Deployment::from_reader(TABLE.as_bytes()).unwrap();
        assert_eq!(deployment.len(), 3);

        let node = deployment.node_for(&ShortAddr::new("19:15")).unwrap();
        assert_eq!(node.as_str(), "2");
        assert_eq!(deployment.coordinates(node), Some(Point::new(3.0, 4.0)));

        let broken = deployment.node_for(&ShortAddr::new("1a:0b")).unwrap();
        assert_eq!(deployment.coordinates(broken), None);
        assert_eq!(deployment.node_for(&ShortAddr::new("ff:ff")), None);
    }

    #[test]
    fn missing_column_is_an_error() {
        let err = Deployment::from_reader("NodeId,Coordinates\n1,\"[0, 0]\"\n".as_bytes()).unwrap_err();
        assert!(matches!(err, AnalyzerError::Csv(_)));
    }
}
