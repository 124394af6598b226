//! Submission payload construction for `POST /batches`.

use crate::types::{ConfValue, Numeric, SubmissionRequest};
use crate::validation::validate_size_format;
use crate::{Error, ErrorContext, Result};
use serde::Serialize;
use std::collections::BTreeMap;

/// Wire body of a batch submission.
///
/// Field order is the serialization order. Unset fields are skipped, never
/// sent as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    pub file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jars: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub py_files: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver_memory: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver_cores: Option<Numeric>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub executor_memory: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub executor_cores: Option<Numeric>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_executors: Option<Numeric>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archives: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub queue: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conf: Option<BTreeMap<String, ConfValue>>,
}

impl SubmissionPayload {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Build the submission body, validating sizes and `conf` values on the way.
///
/// The first validation failure is returned; no partial payload escapes.
pub fn build_submission_payload(request: &SubmissionRequest) -> Result<SubmissionPayload> {
    let driver_memory = memory_field(request.driver_memory.as_deref(), "driverMemory")?;
    let executor_memory = memory_field(request.executor_memory.as_deref(), "executorMemory")?;
    let conf = conf_field(&request.conf)?;

    Ok(SubmissionPayload {
        file: request.file.clone(),
        proxy_user: text_field(&request.proxy_user),
        class_name: text_field(&request.class_name),
        args: if request.args.is_empty() {
            None
        } else {
            Some(request.args.iter().map(ToString::to_string).collect())
        },
        jars: list_field(&request.jars),
        py_files: list_field(&request.py_files),
        files: list_field(&request.files),
        driver_memory,
        driver_cores: numeric_field(&request.driver_cores),
        executor_memory,
        executor_cores: numeric_field(&request.executor_cores),
        num_executors: numeric_field(&request.num_executors),
        archives: list_field(&request.archives),
        queue: text_field(&request.queue),
        name: text_field(&request.name),
        conf,
    })
}

fn text_field(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|s| !s.is_empty()).cloned()
}

fn list_field(values: &[String]) -> Option<Vec<String>> {
    if values.is_empty() {
        None
    } else {
        Some(values.to_vec())
    }
}

fn numeric_field(value: &Option<Numeric>) -> Option<Numeric> {
    value.as_ref().filter(|n| n.is_set()).cloned()
}

fn memory_field(value: Option<&str>, field: &str) -> Result<Option<String>> {
    match value.filter(|s| !s.is_empty()) {
        Some(size) => {
            validate_size_format(size).map_err(|e| match e {
                Error::InvalidArgument { message, context } => Error::InvalidArgument {
                    message,
                    context: context.with_field_path(field),
                },
                other => other,
            })?;
            Ok(Some(size.to_string()))
        }
        None => Ok(None),
    }
}

fn conf_field(conf: &BTreeMap<String, ConfValue>) -> Result<Option<BTreeMap<String, ConfValue>>> {
    if conf.is_empty() {
        return Ok(None);
    }
    if let Some((key, _)) = conf
        .iter()
        .find(|(_, v)| matches!(v, ConfValue::Str(s) if s.is_empty()))
    {
        return Err(Error::invalid_argument_with_context(
            "'conf' values must be either strings or ints",
            ErrorContext::new()
                .with_field_path(format!("conf.{}", key))
                .with_details("empty string")
                .with_source("conf_validator"),
        ));
    }
    Ok(Some(conf.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_file_only_payload() {
        let payload = build_submission_payload(&SubmissionRequest::new("appname")).unwrap();
        assert_eq!(serde_json::to_value(&payload).unwrap(), json!({"file": "appname"}));
    }

    #[test]
    fn test_full_payload() {
        let request = SubmissionRequest::new("appname")
            .class_name("org.example.livy")
            .proxy_user("proxyUser")
            .args(vec![crate::types::Stringable::from("a"), 1.into(), 2.5.into()])
            .jars(["jar1", "jar2"])
            .files(["file1"])
            .py_files(["py1"])
            .archives(["arch1"])
            .queue("queue")
            .name("name")
            .conf_entry("a", "b")
            .conf_entry("c", 3)
            .driver_cores(1)
            .executor_cores("4")
            .driver_memory("1M")
            .executor_memory("1m")
            .num_executors("10");

        let payload = build_submission_payload(&request).unwrap();
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "file": "appname",
                "className": "org.example.livy",
                "proxyUser": "proxyUser",
                "args": ["a", "1", "2.5"],
                "jars": ["jar1", "jar2"],
                "files": ["file1"],
                "pyFiles": ["py1"],
                "archives": ["arch1"],
                "queue": "queue",
                "name": "name",
                "conf": {"a": "b", "c": 3},
                "driverCores": 1,
                "executorCores": "4",
                "driverMemory": "1M",
                "executorMemory": "1m",
                "numExecutors": "10"
            })
        );
    }

    #[test]
    fn test_wire_key_order() {
        let request = SubmissionRequest::new("f")
            .name("n")
            .class_name("C")
            .proxy_user("u")
            .queue("q");
        let json = build_submission_payload(&request).unwrap().to_json().unwrap();
        assert_eq!(
            json,
            r#"{"file":"f","proxyUser":"u","className":"C","queue":"q","name":"n"}"#
        );
    }

    #[test]
    fn test_empty_values_are_omitted() {
        let mut request = SubmissionRequest::new("f").name("").num_executors(0).driver_cores("");
        request.jars = Vec::new();
        request.driver_memory = Some(String::new());
        let payload = build_submission_payload(&request).unwrap();
        assert_eq!(serde_json::to_value(&payload).unwrap(), json!({"file": "f"}));
    }

    #[test]
    fn test_invalid_memory_fails() {
        let err = build_submission_payload(&SubmissionRequest::new("f").driver_memory("1.5g"))
            .unwrap_err();
        assert!(err.is_invalid_argument());
        assert_eq!(err.context().unwrap().field_path.as_deref(), Some("driverMemory"));

        let err = build_submission_payload(&SubmissionRequest::new("f").executor_memory("lots"))
            .unwrap_err();
        assert_eq!(err.context().unwrap().field_path.as_deref(), Some("executorMemory"));
    }

    #[test]
    fn test_empty_conf_string_fails() {
        let err = build_submission_payload(&SubmissionRequest::new("f").conf_entry("k", ""))
            .unwrap_err();
        assert!(err.is_invalid_argument());
    }
}
