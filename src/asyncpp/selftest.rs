//! Built-in sample conversions, run by `asyncpp --test`.

use std::fmt;

use crate::asyncpp::pipeline::Converter;

/// A source snippet and a substring its conversion must contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    pub source: &'static str,
    pub expected: &'static str,
}

pub const SAMPLES: &[Sample] = &[
    Sample {
        source: "int var = await async int(int num) { return 1; } (2);",
        expected: "int var = (std::async([](int num)[=](){\nreturn 1; \n}(2)).get();",
    },
    Sample {
        source: "async int foo(int num) { return 1; }",
        expected: "std::future<int> foo(int num) { return std::async([=](){\nreturn 1; \n}); }",
    },
    Sample {
        source: "await dl(u);",
        expected: "dl(u).get();",
    },
];

/// Result of running one [`Sample`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Pass { expected: &'static str },
    Fail { expected: &'static str, got: String },
}

impl Outcome {
    pub fn passed(&self) -> bool {
        matches!(self, Outcome::Pass { .. })
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Pass { expected } => write!(f, "[PASS] '{expected}' found."),
            Outcome::Fail { expected, got } => {
                write!(f, "[FAIL] Expected '{expected}' in output, got: {got}")
            }
        }
    }
}

pub fn run_sample(converter: &Converter, sample: &Sample) -> Outcome {
    match converter.convert(sample.source, false) {
        Ok(out) if out.contains(sample.expected) => Outcome::Pass {
            expected: sample.expected,
        },
        Ok(out) => Outcome::Fail {
            expected: sample.expected,
            got: out,
        },
        Err(err) => Outcome::Fail {
            expected: sample.expected,
            got: err.to_string(),
        },
    }
}

pub fn run_samples(converter: &Converter) -> Vec<Outcome> {
    SAMPLES
        .iter()
        .map(|sample| run_sample(converter, sample))
        .collect()
}
