use serde::Serialize;

use super::types::Device;
use crate::error::Result;

const SEQUENCE_TYPE: &str = "com.amazon.alexa.behaviors.model.Sequence";
const OPERATION_NODE_TYPE: &str = "com.amazon.alexa.behaviors.model.OpaquePayloadOperationNode";

/// A behavior the preview endpoint can run on a single device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation<'a> {
    Speak(&'a str),
    Weather,
}

impl Operation<'_> {
    pub fn behavior_type(&self) -> &'static str {
        match self {
            Operation::Speak(_) => "Alexa.Speak",
            Operation::Weather => "Alexa.Weather.Play",
        }
    }

    fn text(&self) -> Option<&str> {
        match self {
            Operation::Speak(text) => Some(*text),
            Operation::Weather => None,
        }
    }
}

/// Body of `POST /api/behaviors/preview`.
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BehaviorPreview {
    pub behavior_id: &'static str,
    /// The sequence, serialized to a JSON string.
    pub sequence_json: String,
    pub status: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Sequence<'a> {
    #[serde(rename = "@type")]
    kind: &'static str,
    start_node: StartNode<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StartNode<'a> {
    #[serde(rename = "@type")]
    kind: &'static str,
    r#type: &'static str,
    operation_payload: OperationPayload<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OperationPayload<'a> {
    device_type: &'a str,
    device_type_id: &'a str,
    device_serial_number: &'a str,
    locale: &'a str,
    customer_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    text_to_speak: Option<&'a str>,
}

impl BehaviorPreview {
    pub fn build(device: &Device, operation: Operation<'_>, locale: &str) -> Result<Self> {
        let target = device.target()?;
        let sequence = Sequence {
            kind: SEQUENCE_TYPE,
            start_node: StartNode {
                kind: OPERATION_NODE_TYPE,
                r#type: operation.behavior_type(),
                operation_payload: OperationPayload {
                    device_type: target.device_type,
                    device_type_id: target.device_type,
                    device_serial_number: target.serial_number,
                    locale,
                    customer_id: target.customer_id,
                    text_to_speak: operation.text(),
                },
            },
        };

        Ok(Self {
            behavior_id: "PREVIEW",
            sequence_json: serde_json::to_string(&sequence)?,
            status: "ENABLED",
        })
    }
}
