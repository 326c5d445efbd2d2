use std::fs;
use std::io::{self, Read};
use std::path::Path;

use miette::*;

/// Reads the whole puzzle input from `path`, where `-` means standard input.
#[tracing::instrument]
pub fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut input = String::new();
        io::stdin()
            .read_to_string(&mut input)
            .into_diagnostic()
            .wrap_err("could not read standard input")?;
        return Ok(input);
    }

    fs::read_to_string(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("could not open {}", path.display()))
}
