//! JSON gate vector loader shared by gate tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(dead_code)]

use std::fs;

use serde::Deserialize;

use modla_core::{GateAction, GateTiming, Verdict};

#[derive(Debug, Deserialize)]
pub struct GateVector {
    pub description: String,
    pub licensed: bool,
    pub counter: u32,
    #[serde(default)]
    pub channel: u32,
    pub timing: TimingData,
    pub input: Vec<f32>,
    pub expect: Vec<f32>,
    pub expect_action: String,
}

#[derive(Debug, Deserialize)]
pub struct TimingData {
    pub grace_samples: u32,
    pub fade_samples: u32,
}

impl GateVector {
    pub fn verdict(&self) -> Verdict {
        Verdict::from(self.licensed)
    }

    pub fn timing(&self) -> GateTiming {
        GateTiming {
            grace_samples: self.timing.grace_samples,
            fade_samples: self.timing.fade_samples,
        }
    }

    pub fn action(&self) -> GateAction {
        match self.expect_action.as_str() {
            "passed" => GateAction::Passed,
            "faded" => GateAction::Faded,
            "silenced" => GateAction::Silenced,
            other => panic!("unsupported action: {other}"),
        }
    }
}

pub fn load(name: &str) -> GateVector {
    let s = fs::read_to_string(format!("tests/vectors/{name}")).unwrap();
    serde_json::from_str(&s).unwrap()
}
