//! Class records and their JSON rendering

use hierscan_api::{ClassRecord, DeclarationNode, ScanError, ScanResult};
use std::io::Write;

use crate::constructors::constructors_of;
use crate::hierarchy::immediate_base_names;

/// Describe one class for the code generator
pub fn to_record<N: DeclarationNode>(class: &N, root_class: &str) -> ClassRecord {
    let bases = immediate_base_names(class)
        .into_iter()
        .map(str::to_string)
        .collect();

    constructors_of(class).into_iter().fold(
        ClassRecord::new(class.display_name())
            .with_root_class(root_class)
            .with_base_classes(bases),
        ClassRecord::with_constructor,
    )
}

/// Pretty-printed JSON array with 2-space indentation
pub fn to_json(records: &[ClassRecord]) -> ScanResult<String> {
    serde_json::to_string_pretty(records).map_err(|e| ScanError::Output(e.to_string()))
}

/// Write the JSON array followed by a newline
pub fn write_json<W: Write>(records: &[ClassRecord], mut writer: W) -> ScanResult<()> {
    let json = to_json(records)?;
    writeln!(writer, "{json}").map_err(|e| ScanError::Output(e.to_string()))?;
    writer.flush().map_err(|e| ScanError::Output(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestNode;
    use hierscan_api::ParameterDescriptor;

    #[test]
    fn test_to_record() {
        let class = TestNode::class("Generator", &["public ColProc"])
            .with_constructor(&[("x", "int x")]);

        let record = to_record(&class, "");
        assert_eq!(record.class_name, "Generator");
        assert_eq!(record.root_class, "");
        assert_eq!(record.base_classes, vec!["ColProc"]);
        assert_eq!(record.constructors.len(), 1);
        assert_eq!(
            record.constructors[0].arguments,
            vec![ParameterDescriptor::new("int", "x")]
        );
    }

    #[test]
    fn test_to_record_root_label() {
        let class = TestNode::class("Counter", &["public Variable<uint32_t>"]);
        let record = to_record(&class, "Variable");
        assert_eq!(record.root_class, "Variable");
        assert_eq!(record.base_classes, vec!["Variable<uint32_t>"]);
    }

    #[test]
    fn test_to_json_shape() {
        let class = TestNode::class("Generator", &["public ColProc"])
            .with_constructor(&[("x", "int x")]);
        let json = to_json(&[to_record(&class, "")]).unwrap();

        let expected = r#"[
  {
    "className": "Generator",
    "rootClass": "",
    "baseClass": [
      "ColProc"
    ],
    "constructors": [
      {
        "arguments": [
          {
            "type": "int",
            "name": "x"
          }
        ]
      }
    ]
  }
]"#;
        assert_eq!(json, expected);
    }

    #[test]
    fn test_empty_output() {
        assert_eq!(to_json(&[]).unwrap(), "[]");

        let mut out = Vec::new();
        write_json(&[], &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "[]\n");
    }
}
