//! Module for the line oriented query console.
//!
//! The console asks for the workload to generate, loads it into an index in random order and
//! then answers date queries until an empty line or the end of the input is reached. At the
//! end the whole index is printed as a table and released.
use std::io::{BufRead, Write};

use rand::Rng;

use crate::bst::Index;
use crate::config::Configuration;
use crate::display::{format_found, format_row, format_trace, local_midnight, parse_query_date};
use crate::error::ConsoleError;
use crate::generator::{self, StartRequest};
use crate::record::Record;

/// Interactive session reading from `input` and writing to `output`.
pub struct Console<R, W> {
    input: R,
    output: W,
    configuration: Configuration,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W, configuration: Configuration) -> Console<R, W> {
        Console { input, output, configuration }
    }

    /// Gives back the output, e.g. to inspect what a session printed.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Runs a complete session.
    ///
    /// # Errors
    ///
    /// * `ConsoleError::MissingRequest` / `ConsoleError::MalformedRequest` - The start request was
    ///     absent or could not be parsed.
    ///
    /// * `ConsoleError::Generator` - The request is out of range or the workload could not be
    ///     generated and inserted.
    ///
    /// * `ConsoleError::Io` - Reading the input or writing the output failed.
    pub fn run<G: Rng + ?Sized>(&mut self, rng: &mut G) -> Result<(), ConsoleError> {
        writeln!(self.output, "Welcome! Temperature & Humidity of {} here we go!", self.configuration.year)?;
        let request = self.read_request()?;

        writeln!(self.output, "User requested {} data items starting at {:2}/{:2}/{}",
                 request.num_days, request.month, request.day, self.configuration.year)?;

        let mut index = self.load_index(&request, rng)?;
        if index.is_empty() {
            writeln!(self.output, "No data was added to the index.")?;
            return Ok(());
        }

        let queries = self.query_loop(&index)?;
        log::info!(target: "envindex::console", "End search for data items in index after {} queries", queries);

        self.print_table(&index)?;
        index.release();

        writeln!(self.output, "\nThank you!\nExiting program.")?;
        self.output.flush()?;
        Ok(())
    }

    fn read_line(&mut self) -> Result<Option<String>, ConsoleError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed_len = line.trim_end_matches(|c: char| c == '\n' || c == '\r').len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }

    fn read_request(&mut self) -> Result<StartRequest, ConsoleError> {
        write!(self.output, "Enter the starting month (1 to 12),day (1 to 31), and number of days (1 to {}): ",
               self.configuration.max_days)?;
        self.output.flush()?;

        let line = match self.read_line()? {
            Some(line) => line,
            None => return Err(ConsoleError::MissingRequest),
        };
        let request = match StartRequest::parse(&line) {
            Some(request) => request,
            None => return Err(ConsoleError::MalformedRequest(line)),
        };
        request.validate(self.configuration.max_days)?;
        Ok(request)
    }

    fn load_index<G: Rng + ?Sized>(&mut self, request: &StartRequest, rng: &mut G) -> Result<Index, ConsoleError> {
        let records = generator::generate(request, self.configuration.year, rng)?;
        let order = generator::shuffle_order(records.len(), rng);

        let mut index = Index::new();
        let inserted = generator::populate(&mut index, &records, &order)?;
        log::debug!(target: "envindex::console", "Loaded {} records, tree height {}", inserted, index.height());
        Ok(index)
    }

    /// Answers queries until an empty line or the end of input. Returns the number of queries.
    fn query_loop(&mut self, index: &Index) -> Result<usize, ConsoleError> {
        let mut queries = 0;
        loop {
            write!(self.output, "\nEnter a search date (mm/dd/yyyy): ")?;
            self.output.flush()?;

            let query = match self.read_line()? {
                Some(line) => line,
                None => break,
            };
            if query.is_empty() {
                break;
            }
            self.search(index, &query)?;
            queries += 1;
        }
        Ok(queries)
    }

    /// Answers a single date query.
    ///
    /// Every node visited on the way is printed before the result. Returns the record found for
    /// the date, if any.
    pub fn search(&mut self, index: &Index, query: &str) -> Result<Option<Record>, ConsoleError> {
        let date = match parse_query_date(query) {
            Some(date) => date,
            None => {
                writeln!(self.output, "Invalid date format. Please use mm/dd/yyyy.")?;
                return Ok(None);
            }
        };

        let timestamp = match local_midnight(date) {
            Some(timestamp) => timestamp,
            None => {
                writeln!(self.output, "Did not find data for Timestamp {}", query)?;
                return Ok(None);
            }
        };
        log::info!(target: "envindex::console", "Starting search for timestamp {}", timestamp);

        let output = &mut self.output;
        let mut trace_result = Ok(());
        let found = index.lookup_traced(timestamp, |node| {
            if trace_result.is_ok() {
                trace_result = writeln!(output, "{}", format_trace(node.record()));
            }
        }).copied();
        trace_result?;

        match found {
            Some(record) => {
                writeln!(self.output, "FOUND-> {}", format_found(&record))?;
            }
            None => {
                writeln!(self.output, "Did not find data for Timestamp {}", query)?;
            }
        }
        Ok(found)
    }

    fn print_table(&mut self, index: &Index) -> Result<(), ConsoleError> {
        let records = index.enumerate();

        writeln!(self.output, "\nTemperature/Humidity table:")?;
        writeln!(self.output, "---------------------------")?;
        for record in &records {
            writeln!(self.output, "{}", format_row(record))?;
        }

        if self.configuration.json_table {
            writeln!(self.output, "{}", serde_json::to_string_pretty(&records)?)?;
        }
        Ok(())
    }
}
