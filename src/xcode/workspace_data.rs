//! Contents of a workspace container.

use serde::Serialize;

/// An entry of a workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum WorkspaceDataElement {
    /// A file, folder reference or project; `location` is `group:<path>`
    File { location: String },
    Group {
        location: String,
        name: String,
        children: Vec<WorkspaceDataElement>,
    },
}

impl WorkspaceDataElement {
    pub fn file(path: &str) -> Self {
        WorkspaceDataElement::File {
            location: format!("group:{}", path),
        }
    }

    pub fn location(&self) -> &str {
        match self {
            WorkspaceDataElement::File { location } | WorkspaceDataElement::Group { location, .. } => {
                location
            }
        }
    }

    pub fn is_file(&self) -> bool {
        matches!(self, WorkspaceDataElement::File { .. })
    }
}

/// The element list of a workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkspaceData {
    pub version: String,
    pub children: Vec<WorkspaceDataElement>,
}

impl WorkspaceData {
    pub fn new(children: Vec<WorkspaceDataElement>) -> Self {
        WorkspaceData {
            version: "1.0".to_string(),
            children,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_shape() {
        let data = WorkspaceData::new(vec![
            WorkspaceDataElement::file("README.md"),
            WorkspaceDataElement::Group {
                location: "group:Modules".to_string(),
                name: "Modules".to_string(),
                children: vec![WorkspaceDataElement::file("Core/Core.xcodeproj")],
            },
        ]);
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["version"], "1.0");
        assert_eq!(json["children"][0]["kind"], "file");
        assert_eq!(json["children"][0]["location"], "group:README.md");
        assert_eq!(json["children"][1]["kind"], "group");
        assert_eq!(json["children"][1]["children"][0]["location"], "group:Core/Core.xcodeproj");
    }
}
