//! Module generating synthetic temperature and humidity samples and feeding them to the index.
use chrono::{Days, NaiveDate};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::bst::Index;
use crate::display::local_midnight;
use crate::error::GeneratorError;
use crate::record::Record;

#[derive(Debug, Clone, Copy, PartialEq)]
/// Plausible value ranges for one calendar month.
pub struct MonthRange
{
    /// Lowest temperature in fahrenheit.
    pub temp_low: f32,
    /// Highest temperature in fahrenheit.
    pub temp_high: f32,
    /// Lowest relative humidity in percent.
    pub humid_low: f32,
    /// Highest relative humidity in percent.
    pub humid_high: f32,
}

impl MonthRange {
    const fn new(temp_low: f32, temp_high: f32, humid_low: f32, humid_high: f32) -> MonthRange {
        MonthRange { temp_low, temp_high, humid_low, humid_high }
    }

    /// Range for `month` (1 = January). Months outside 1 to 12 get the January range.
    pub fn for_month(month: u32) -> MonthRange {
        match month {
            2 => MonthRange::new(38.0, 51.0, 70.0, 85.0),
            3 => MonthRange::new(41.0, 56.0, 65.0, 80.0),
            4 => MonthRange::new(44.0, 62.0, 60.0, 75.0),
            5 => MonthRange::new(49.0, 69.0, 55.0, 70.0),
            6 => MonthRange::new(53.0, 74.0, 50.0, 65.0),
            7 => MonthRange::new(57.0, 82.0, 45.0, 60.0),
            8 => MonthRange::new(57.0, 83.0, 45.0, 60.0),
            9 => MonthRange::new(53.0, 76.0, 50.0, 65.0),
            10 => MonthRange::new(47.0, 64.0, 60.0, 75.0),
            11 => MonthRange::new(41.0, 52.0, 70.0, 85.0),
            12 => MonthRange::new(36.0, 45.0, 75.0, 90.0),
            _ => MonthRange::new(36.0, 46.0, 75.0, 90.0),
        }
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> (u32, u32) {
        let temperature = rng.random_range(self.temp_low..=self.temp_high);
        let humidity = rng.random_range(self.humid_low..=self.humid_high);
        (temperature as u32, humidity as u32)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// The workload a user asked for: `num_days` consecutive days starting at `month`/`day`.
pub struct StartRequest
{
    pub month: u32,
    pub day: u32,
    pub num_days: u32,
}

impl StartRequest {
    /// Parses a request in `MM,DD,NUM_DAYS` notation. Whitespace around the numbers is ignored.
    pub fn parse(input: &str) -> Option<StartRequest> {
        let mut fields = input.trim().split(',').map(|field| field.trim().parse::<u32>());
        let month = fields.next()?.ok()?;
        let day = fields.next()?.ok()?;
        let num_days = fields.next()?.ok()?;
        if fields.next().is_some() {
            return None;
        }
        Some(StartRequest { month, day, num_days })
    }

    /// Checks the request against the accepted ranges.
    pub fn validate(&self, max_days: u32) -> Result<(), GeneratorError> {
        if self.month < 1 || self.month > 12 {
            return Err(GeneratorError::InvalidMonth(self.month));
        }
        if self.day < 1 || self.day > 31 {
            return Err(GeneratorError::InvalidDay(self.day));
        }
        if self.num_days < 1 || self.num_days > max_days {
            return Err(GeneratorError::InvalidDayCount { requested: self.num_days, max: max_days });
        }
        Ok(())
    }
}

/// Creates the random number generator for the workload.
///
/// A fixed seed makes the generated samples and the insertion order reproducible.
pub fn workload_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => {
            log::debug!(target: "envindex::gen", "Using fixed seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_os_rng(),
    }
}

/// Generates one record per day, starting at local midnight of the requested date in `year`.
///
/// All values are drawn from the range of the starting month, also when the days run into the
/// following months.
///
/// # Errors
///
/// * `GeneratorError::InvalidDate` - The start day does not exist in that month.
///
/// * `GeneratorError::MissingMidnight` - Midnight of a day falls into a daylight saving gap.
///
/// * `GeneratorError::Reserve` - No memory for the records could be reserved.
pub fn generate<R: Rng + ?Sized>(request: &StartRequest, year: i32, rng: &mut R) -> Result<Vec<Record>, GeneratorError> {
    let start = match NaiveDate::from_ymd_opt(year, request.month, request.day) {
        Some(date) => date,
        None => return Err(GeneratorError::InvalidDate { year, month: request.month, day: request.day }),
    };

    let count = request.num_days as usize;
    let mut records = Vec::new();
    records.try_reserve(count).map_err(|_| GeneratorError::Reserve(count))?;

    let range = MonthRange::for_month(request.month);
    for offset in 0..request.num_days {
        let date = start.checked_add_days(Days::new(u64::from(offset)))
            .ok_or(GeneratorError::CalendarOverflow(start))?;
        let timestamp = local_midnight(date).ok_or(GeneratorError::MissingMidnight(date))?;
        let (temperature, humidity) = range.sample(rng);
        records.push(Record::new(timestamp, temperature, humidity));
    }
    Ok(records)
}

/// Random permutation of the positions `0..len`.
pub fn shuffle_order<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Vec<usize> {
    let mut order: Vec<usize> = (0..len).collect();
    order.shuffle(rng);
    order
}

/// Inserts `records` into `index` in the sequence given by `order`.
///
/// Returns the number of records handed to the index.
///
/// # Errors
///
/// * `GeneratorError::Index` - A node could not be allocated. The records inserted before the
///     failure stay in the index.
pub fn populate(index: &mut Index, records: &[Record], order: &[usize]) -> Result<usize, GeneratorError> {
    let mut inserted = 0;
    for &position in order {
        let record = match records.get(position) {
            Some(record) => record,
            None => {
                log::warn!(target: "envindex::gen", "Skipping position {} outside of {} records", position, records.len());
                continue;
            }
        };
        log::info!(target: "envindex::gen", "added timestamp {} from data[{}] to index", record.timestamp, position);
        index.insert(*record)?;
        inserted += 1;
    }
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(month: u32, day: u32, num_days: u32) -> StartRequest {
        StartRequest { month, day, num_days }
    }

    #[test]
    fn parse_request() {
        assert_eq!(StartRequest::parse("3,15,10"), Some(request(3, 15, 10)));
        assert_eq!(StartRequest::parse(" 12, 1 ,5\n"), Some(request(12, 1, 5)));
        assert_eq!(StartRequest::parse("3,15"), None);
        assert_eq!(StartRequest::parse("3,15,10,1"), None);
        assert_eq!(StartRequest::parse("3/15/10"), None);
        assert_eq!(StartRequest::parse("-1,15,10"), None);
    }

    #[test]
    fn validate_request() {
        assert!(request(1, 1, 1).validate(100).is_ok());
        assert!(request(12, 31, 100).validate(100).is_ok());
        assert_eq!(request(0, 1, 1).validate(100), Err(GeneratorError::InvalidMonth(0)));
        assert_eq!(request(13, 1, 1).validate(100), Err(GeneratorError::InvalidMonth(13)));
        assert_eq!(request(1, 32, 1).validate(100), Err(GeneratorError::InvalidDay(32)));
        assert_eq!(request(1, 1, 0).validate(100),
                   Err(GeneratorError::InvalidDayCount { requested: 0, max: 100 }));
        assert_eq!(request(1, 1, 101).validate(100),
                   Err(GeneratorError::InvalidDayCount { requested: 101, max: 100 }));
    }

    #[test]
    fn unknown_month_uses_january() {
        assert_eq!(MonthRange::for_month(0), MonthRange::for_month(1));
        assert_eq!(MonthRange::for_month(13), MonthRange::for_month(1));
        assert_ne!(MonthRange::for_month(12), MonthRange::for_month(1));
    }

    #[test]
    fn generated_days_are_consecutive_and_in_range() {
        let mut rng = StdRng::seed_from_u64(1);
        let records = generate(&request(6, 10, 7), 2023, &mut rng).unwrap();
        assert_eq!(records.len(), 7);
        assert_eq!(records[0].timestamp, local_midnight(NaiveDate::from_ymd_opt(2023, 6, 10).unwrap()).unwrap());
        for pair in records.windows(2) {
            assert_eq!(pair[1].timestamp - pair[0].timestamp, 86_400);
        }
        for record in &records {
            assert!((53..=74).contains(&record.temperature), "temperature {}", record.temperature);
            assert!((50..=65).contains(&record.humidity), "humidity {}", record.humidity);
        }
    }

    #[test]
    fn days_roll_into_next_month() {
        let mut rng = StdRng::seed_from_u64(2);
        let records = generate(&request(1, 30, 5), 2023, &mut rng).unwrap();
        let last = local_midnight(NaiveDate::from_ymd_opt(2023, 2, 3).unwrap()).unwrap();
        assert_eq!(records.last().map(|r| r.timestamp), Some(last));
        assert!(records.iter().all(|r| (36..=46).contains(&r.temperature)));
    }

    #[test]
    fn invalid_start_date() {
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(generate(&request(2, 30, 1), 2023, &mut rng),
                   Err(GeneratorError::InvalidDate { year: 2023, month: 2, day: 30 }));
    }

    #[test]
    fn same_seed_same_workload() {
        let first = generate(&request(4, 1, 20), 2023, &mut workload_rng(Some(9))).unwrap();
        let second = generate(&request(4, 1, 20), 2023, &mut workload_rng(Some(9))).unwrap();
        assert_eq!(first, second);
        assert_eq!(shuffle_order(20, &mut workload_rng(Some(9))), shuffle_order(20, &mut workload_rng(Some(9))));
    }

    #[test]
    fn shuffle_is_permutation() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut order = shuffle_order(50, &mut rng);
        order.sort_unstable();
        assert_eq!(order, (0..50).collect::<Vec<_>>());
        assert!(shuffle_order(0, &mut rng).is_empty());
    }

    #[test]
    fn populate_inserts_every_record() {
        let mut rng = StdRng::seed_from_u64(5);
        let records = generate(&request(9, 1, 30), 2023, &mut rng).unwrap();
        let order = shuffle_order(records.len(), &mut rng);

        let mut index = Index::new();
        assert_eq!(populate(&mut index, &records, &order), Ok(30));
        assert_eq!(index.enumerate(), records);
    }

    #[test]
    fn populate_skips_unknown_positions() {
        let records = vec![Record::new(10, 1, 1), Record::new(20, 2, 2)];
        let mut index = Index::new();
        assert_eq!(populate(&mut index, &records, &[1, 5, 0]), Ok(2));
        assert_eq!(index.len(), 2);
    }
}
