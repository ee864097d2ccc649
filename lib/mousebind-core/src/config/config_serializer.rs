use crate::config::{BindingConfig, Config};
use schemars::{schema_for, Schema};
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

const HEADER: &str = "# Mousebind Configuration File\n# Changes will take effect immediately\n\n";

pub fn serialize_config(config: &Config, path: &Path) -> io::Result<()> {
    let output = config_to_string(config)?;
    let mut file = File::create(path)?;
    file.write_all(output.as_bytes())?;
    Ok(())
}

/// Renders the config as YAML with each field's documentation above it
pub fn config_to_string(config: &Config) -> io::Result<String> {
    let yaml_string =
        serde_yaml::to_string(config).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    let mut field_docs = HashMap::new();
    let config_schema = schema_for!(Config);
    extract_field_documentation(&config_schema, "", &mut field_docs);

    let binding_schema = schema_for!(BindingConfig);
    extract_field_documentation(&binding_schema, "bindings", &mut field_docs);

    let mut output = String::new();
    output.push_str(HEADER);
    output.push_str(&add_comments_to_yaml(&yaml_string, &field_docs));
    output.push('\n');
    Ok(output)
}

fn extract_field_documentation(
    schema: &Schema,
    prefix: &str,
    field_docs: &mut HashMap<String, String>,
) {
    let Some(properties) = schema
        .as_object()
        .and_then(|schema_obj| schema_obj.get("properties"))
        .and_then(|properties| properties.as_object())
    else {
        return;
    };

    for (key, prop_value) in properties {
        let field_path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };

        if let Some(description) = prop_value.get("description").and_then(|d| d.as_str()) {
            field_docs.insert(field_path, description.to_string());
        }
    }
}

/// Comments top level keys, and the keys of the first item of each top level list
fn add_comments_to_yaml(yaml: &str, field_docs: &HashMap<String, String>) -> String {
    let mut result: Vec<String> = Vec::new();
    let mut section = String::new();
    let mut item_indent: Option<usize> = None;
    let mut items_seen = 0;

    for line in yaml.lines() {
        let trimmed = line.trim_start();
        let indent = line.len() - trimmed.len();
        let (is_item, content) = match trimmed.strip_prefix("- ") {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        if is_item {
            item_indent = Some(indent);
            items_seen += 1;
        }

        if let Some(colon_pos) = content.find(':') {
            let field_name = content[..colon_pos].trim();

            let doc_path = if indent == 0 && !is_item {
                section = field_name.to_string();
                item_indent = None;
                items_seen = 0;
                Some(field_name.to_string())
            } else {
                let item_field =
                    is_item || item_indent.is_some_and(|item_indent| indent == item_indent + 2);
                (item_field && items_seen == 1).then(|| format!("{}.{}", section, field_name))
            };

            if let Some(doc) = doc_path.and_then(|path| field_docs.get(&path)) {
                if !result.is_empty() {
                    result.push(String::new());
                }
                result.push(format!("{}# {}", " ".repeat(indent), doc));
            }
        }

        result.push(line.to_string());
    }

    result.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documents_fields() {
        let output = config_to_string(&Config::default()).unwrap();
        assert!(output.starts_with("# Mousebind Configuration File"));
        assert!(output.contains("# The mouse bindings to install\nbindings:"));
        assert!(output.contains("# Whether to log every input event at debug level"));
        assert!(output.contains("# Unique name for this binding"));
    }

    #[test]
    fn test_documented_output_parses_back() {
        let mut config = Config::default();
        config.bindings.push(config.bindings[0].clone());
        config.bindings[1].name = "second".to_string();

        let output = config_to_string(&config).unwrap();
        let parsed: Config = serde_yaml::from_str(&output).unwrap();
        assert_eq!(parsed, config);
        assert_eq!(output.matches("# Unique name for this binding").count(), 1);
    }
}
