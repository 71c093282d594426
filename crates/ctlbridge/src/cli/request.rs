//! `ctlbridge-request`: one JSON request in, one envelope out.

use std::ffi::OsString;
use std::io::{BufRead, Write};
use std::time::Instant;

use clap::{ArgAction, Parser};
use ctlbridge_dispatch::{DispatchError, Dispatcher, DispatcherInit, DistributeOptions};
use serde_json::{Map, Value};
use tracing::debug;

use crate::cli::envelope::Envelope;
use crate::cli::exit::{io_error, CliError, CliResult, FAILURE, SUCCESS};

pub const USAGE: &str = "
    ctlbridge request

    \t-p, --pretty       Pretty JSON
    \t-d, --debug        Debug mode
    \t-l, --list         List functions
    \t-h, --help         Help
";

/// At most this many flag occurrences per invocation.
const MAX_FLAGS: usize = 2;

#[derive(Parser, Debug)]
#[command(
    name = "ctlbridge-request",
    disable_help_flag = true,
    disable_version_flag = true
)]
struct RequestArgs {
    #[arg(short, long, action = ArgAction::Count)]
    pretty: u8,
    #[arg(short, long, action = ArgAction::Count)]
    debug: u8,
    #[arg(short, long, action = ArgAction::Count)]
    list: u8,
    #[arg(short, long, action = ArgAction::Count)]
    help: u8,
}

impl RequestArgs {
    fn occurrences(&self) -> usize {
        [self.pretty, self.debug, self.list, self.help]
            .iter()
            .map(|n| usize::from(*n))
            .sum()
    }
}

/// Output and dispatch flags, passed explicitly to everything that needs them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestOptions {
    pub pretty: bool,
    pub debug: bool,
    pub list: bool,
}

impl RequestOptions {
    fn distribute_options(self) -> DistributeOptions {
        DistributeOptions {
            debug: self.debug,
            pretty: self.pretty,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum Invocation {
    Help,
    Run(RequestOptions),
}

/// Parse the command line (program name first).
pub fn parse_args<I, T>(args: I) -> CliResult<Invocation>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args = RequestArgs::try_parse_from(args).map_err(|err| {
        let rendered = err.to_string();
        let summary = rendered
            .lines()
            .next()
            .unwrap_or("invalid arguments")
            .trim_start_matches("error: ")
            .to_string();
        CliError::usage(summary)
    })?;

    if args.occurrences() > MAX_FLAGS {
        return Err(CliError::usage("Incorrect number of arguments."));
    }
    if args.help > 0 {
        return Ok(Invocation::Help);
    }

    Ok(Invocation::Run(RequestOptions {
        pretty: args.pretty > 0,
        debug: args.debug > 0,
        list: args.list > 0,
    }))
}

/// Interpret one raw line of input. Only a JSON object counts as a request;
/// bytes that are not UTF-8 are rejected like any other malformed JSON.
pub fn parse_request(line: &[u8]) -> Option<Map<String, Value>> {
    match serde_json::from_slice::<Value>(line.trim_ascii()) {
        Ok(Value::Object(request)) => Some(request),
        _ => None,
    }
}

/// Run one request against an already loaded (or failed) dispatcher.
///
/// Returns the process exit code. An `Err` is only produced for local I/O
/// failures and, in debug mode, for dispatcher faults that were already
/// reported in the envelope.
pub fn run<D, R, W>(
    init: DispatcherInit<D>,
    options: RequestOptions,
    mut input: R,
    out: &mut W,
) -> CliResult<i32>
where
    D: Dispatcher,
    R: BufRead,
    W: Write,
{
    let emit = |out: &mut W, envelope: Envelope| {
        envelope
            .write_to(out, options.pretty)
            .map_err(|err| io_error("failed writing response", err))
    };

    let mut request = Map::new();
    if !options.list {
        let mut line = Vec::new();
        input
            .read_until(b'\n', &mut line)
            .map_err(|err| io_error("failed reading stdin", err))?;
        match parse_request(&line) {
            Some(parsed) => request = parsed,
            None => {
                emit(out, Envelope::bad_json())?;
                return Ok(FAILURE);
            }
        }
    }

    let mut dispatcher = match init {
        DispatcherInit::Ready(dispatcher) => dispatcher,
        DispatcherInit::Unavailable(unavailable) => {
            debug!(kind = ?unavailable.kind, "dispatcher unavailable");
            emit(out, Envelope::unavailable(&unavailable))?;
            // Reported as a normal response body, so the caller sees the message.
            return Ok(SUCCESS);
        }
    };

    if options.list {
        return match dispatcher.functions() {
            Ok(mut functions) => {
                functions.sort();
                functions.dedup();
                emit(out, Envelope::success(functions))?;
                Ok(SUCCESS)
            }
            Err(err) => report_fault(err, options, out),
        };
    }

    if !request.contains_key("function") {
        emit(out, Envelope::missing_function())?;
        return Ok(FAILURE);
    }

    request.insert("from_cluster".to_string(), Value::Bool(false));
    let started = Instant::now();
    match dispatcher.distribute(request, options.distribute_options()) {
        Ok(data) => {
            debug!(elapsed = ?started.elapsed(), "total time");
            debug!(bytes = data.len(), "size of all received data");
            writeln!(out, "{data}")
                .and_then(|()| out.flush())
                .map_err(|err| io_error("failed writing response", err))?;
            Ok(SUCCESS)
        }
        Err(err) => report_fault(err, options, out),
    }
}

fn report_fault<W: Write>(
    err: DispatchError,
    options: RequestOptions,
    out: &mut W,
) -> CliResult<i32> {
    let envelope = match &err {
        DispatchError::Fault { message, code } => Envelope::failure(*code, message),
        other => Envelope::internal(other),
    };
    envelope
        .write_to(out, options.pretty)
        .map_err(|io| io_error("failed writing response", io))?;

    if options.debug {
        return Err(CliError::new(FAILURE, format!("dispatch failed: {err:?}")));
    }
    Ok(SUCCESS)
}
