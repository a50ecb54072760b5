//! Command-line tokenizer
//!
//! ```text
//! image_processor <input.bmp> <output.bmp> [-<filter> [param ...]] ...
//! ```
//!
//! Every token after the two paths that starts with `-` opens a new filter
//! group; the tokens up to the next `-` token are its parameters. The paths
//! may be any OS string; filter tokens must be UTF-8.

use crate::Error;
use bmpfx_filter::FilterSpec;
use std::ffi::OsString;
use std::path::PathBuf;

/// Parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arguments {
    pub input: PathBuf,
    pub output: PathBuf,
    pub filters: Vec<FilterSpec>,
}

/// Split `args` (including the program name) into paths and filter groups.
///
/// # Errors
///
/// [`Error::Usage`] if either path is missing, a filter token is not
/// UTF-8, or a filter group does not start with `-`. Filter names and
/// parameters are not checked here.
pub fn parse_args<I, S>(args: I) -> Result<Arguments, Error>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let mut args = args.into_iter().map(Into::into).skip(1);

    let (Some(input), Some(output)) = (args.next(), args.next()) else {
        return Err(Error::Usage("not enough params".to_string()));
    };

    let tokens = args
        .map(|arg| {
            arg.into_string().map_err(|raw| {
                Error::Usage(format!(
                    "filter argument {:?} is not valid UTF-8",
                    raw.to_string_lossy()
                ))
            })
        })
        .collect::<Result<Vec<String>, Error>>()?;
    let mut args = tokens.into_iter().peekable();

    let mut filters = Vec::new();
    while let Some(token) = args.next() {
        let Some(name) = token.strip_prefix('-') else {
            return Err(Error::Usage("wrong filters input (missing -)".to_string()));
        };
        let mut params = Vec::new();
        while let Some(param) = args.next_if(|t| !t.starts_with('-')) {
            params.push(param);
        }
        filters.push(FilterSpec::new(name, params));
    }

    Ok(Arguments {
        input: input.into(),
        output: output.into(),
        filters,
    })
}
