pub mod decipher;
pub mod encrypt;
pub mod request;
pub mod train;

use cipherforge::error::DfResult;
use std::fs;
use std::io::{self, Read};

/// Text given inline wins; otherwise the file is read, or stdin when neither is set.
pub fn read_input(text: &Option<String>, input: &Option<String>) -> DfResult<String> {
    if let Some(t) = text {
        return Ok(t.clone());
    }
    match input {
        Some(path) => Ok(fs::read_to_string(path)?),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}
