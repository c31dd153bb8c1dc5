pub mod cli;
pub mod comparison;
pub mod engine;
pub mod errors;
pub mod filter;
pub mod jsonpath;
pub mod report;
pub mod value;
mod parser;

use std::io::Write;

use cli::{Invocation, Mode};
use errors::Result;
use report::Outcome;

/// Load the invocation's document and run the selected mode, writing the
/// report to `out`.
pub fn run<W: Write>(invocation: &Invocation, out: &mut W) -> Result<Outcome> {
    let doc = engine::load_document(&invocation.file)?;
    match invocation.mode {
        Mode::Read => report::run_read(&doc, &invocation.payload, out),
        Mode::Compare => report::run_compare(&doc, &invocation.payload, out),
    }
}

/// Re-export the most-used pieces for users who query documents directly.
pub use comparison::{canonical, values_equal};
pub use engine::{from_json, get_json_value, query};
pub use filter::Condition;
pub use jsonpath::{evaluate, Path, ResolutionSet, Segment, SegmentKind};
