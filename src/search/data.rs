// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::io::{self, Write};
use std::sync::Mutex;

use csv::Writer;

use crate::position::Position;
use crate::search::SearchResult;

/// One row of search statistics.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub fen: String,
    pub depth: u32,
    pub best_move: String,
    pub score: String,
    pub principal_variation: String,
    pub nodes_expanded: u64,
    pub leaves_evaluated: u64,
    pub expansion_ms: u64,
    pub evaluation_ms: u64,
}

impl Record {
    pub fn from_result(depth: u32, result: &SearchResult) -> Record {
        Record {
            fen: String::new(),
            depth,
            best_move: result
                .best_move
                .map(|m| m.to_string())
                .unwrap_or_else(|| "-".to_owned()),
            score: result.score.to_string(),
            principal_variation: result
                .principal_variation
                .iter()
                .map(|m| m.to_string())
                .collect::<Vec<_>>()
                .join(" "),
            nodes_expanded: result.nodes_expanded,
            leaves_evaluated: result.leaves_evaluated,
            expansion_ms: as_millis(result.expansion_time),
            evaluation_ms: as_millis(result.evaluation_time),
        }
    }
}

fn as_millis(duration: std::time::Duration) -> u64 {
    duration.as_secs() * 1000 + u64::from(duration.subsec_millis())
}

pub trait DataRecorder {
    fn record(&self, pos: &Position, rec: &Record) -> io::Result<()>;
}

pub struct NullDataRecorder;
impl DataRecorder for NullDataRecorder {
    fn record(&self, _pos: &Position, _rec: &Record) -> io::Result<()> {
        Ok(())
    }
}

pub struct CsvDataRecorder<W: Write> {
    writer: Mutex<Writer<W>>,
}

impl<W: Write> CsvDataRecorder<W> {
    pub fn new(writer: W) -> CsvDataRecorder<W> {
        CsvDataRecorder {
            writer: Mutex::new(Writer::from_writer(writer)),
        }
    }

    /// Like `new`, but without a header row, for appending to a file that
    /// already has one.
    pub fn without_headers(writer: W) -> CsvDataRecorder<W> {
        let writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);
        CsvDataRecorder {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> io::Result<W> {
        let writer = self
            .writer
            .into_inner()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "csv writer lock poisoned"))?;
        writer
            .into_inner()
            .map_err(|err| io::Error::new(io::ErrorKind::Other, err.to_string()))
    }
}

impl<W: Write> DataRecorder for CsvDataRecorder<W> {
    fn record(&self, pos: &Position, rec: &Record) -> io::Result<()> {
        let mut copy = rec.clone();
        copy.fen = pos.as_fen();
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "csv writer lock poisoned"))?;
        writer.serialize(&copy)?;
        writer.flush()
    }
}
