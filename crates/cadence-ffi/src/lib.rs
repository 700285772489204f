//! cadence-ffi
//!
//! Minimal C ABI over the cadence-core calculators for Swift/Kotlin bindings.
//! Instants cross the boundary as local wall-clock fields; callers own the
//! clock and pass `now` explicitly.

use std::{
    ffi::CString,
    os::raw::{c_char, c_double, c_int},
    ptr,
    sync::OnceLock,
};

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

use cadence_core::{
    calendar, BudgetPeriodConfig, CoreError, PeriodCalculator, RecurrenceConfig,
    RecurrenceTracker, UrgencyTier,
};
use cadence_domain::{Frequency, PreconditionPolicy};

/// Semantic version of the FFI surface. Bumps when the ABI changes.
pub const FFI_VERSION: &str = "0.1.0";

pub const CADENCE_OK: c_int = 0;
pub const CADENCE_ERR_NULL_OUTPUT: c_int = 1;
pub const CADENCE_ERR_INVALID_ARGUMENT: c_int = 2;
pub const CADENCE_ERR_VALIDATION: c_int = 3;

/// Calendar date.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FfiDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

/// Local wall-clock instant with millisecond precision.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FfiDateTime {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub millisecond: u32,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FfiPeriodWindow {
    pub period_start: FfiDateTime,
    pub period_end: FfiDateTime,
    pub days_until_reset: i64,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FfiRecurrenceStatus {
    pub days_until_due: i64,
    /// 0 overdue, 1 due soon, 2 this week, 3 upcoming.
    pub urgency_tier: c_int,
    pub period_progress_percent: c_double,
    pub annual_cost: c_double,
    pub monthly_average: c_double,
    pub weekly_average: c_double,
    pub daily_average: c_double,
}

impl FfiDate {
    /// `None` for impossible dates and years outside [`calendar::SUPPORTED_YEARS`].
    fn to_naive(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
            .filter(|date| calendar::is_supported(*date))
    }
}

impl FfiDateTime {
    fn to_naive(self) -> Option<NaiveDateTime> {
        let date = FfiDate {
            year: self.year,
            month: self.month,
            day: self.day,
        }
        .to_naive()?;
        date.and_hms_milli_opt(self.hour, self.minute, self.second, self.millisecond)
    }
}

impl From<NaiveDateTime> for FfiDateTime {
    fn from(value: NaiveDateTime) -> Self {
        Self {
            year: value.year(),
            month: value.month(),
            day: value.day(),
            hour: value.hour(),
            minute: value.minute(),
            second: value.second(),
            millisecond: value.nanosecond() / 1_000_000,
        }
    }
}

/// Returns the engine semantic version. The string is static; do not free it.
#[no_mangle]
pub extern "C" fn cadence_core_version() -> *const c_char {
    static CORE: OnceLock<CString> = OnceLock::new();
    CORE.get_or_init(|| CString::new(cadence_core::VERSION).unwrap_or_default())
        .as_ptr()
}

/// Returns the FFI surface semantic version. The string is static; do not free it.
#[no_mangle]
pub extern "C" fn cadence_ffi_version() -> *const c_char {
    static FFI: OnceLock<CString> = OnceLock::new();
    FFI.get_or_init(|| CString::new(FFI_VERSION).unwrap_or_default())
        .as_ptr()
}

/// Computes the budget window containing `now`.
///
/// `period_code`: 0 weekly (`start_day` 0-6, Sunday = 0), 1 monthly (`start_day` 1-28).
#[no_mangle]
pub extern "C" fn cadence_compute_window(
    period_code: c_int,
    start_day: c_int,
    now: FfiDateTime,
    out_window: *mut FfiPeriodWindow,
    out_error: *mut *mut c_char,
) -> c_int {
    clear_error(out_error);
    if out_window.is_null() {
        unsafe {
            write_error(out_error, "output window is null");
        }
        return CADENCE_ERR_NULL_OUTPUT;
    }
    let Some(now) = now.to_naive() else {
        unsafe {
            write_error(out_error, "now is not a supported date-time");
        }
        return CADENCE_ERR_INVALID_ARGUMENT;
    };
    let config = match period_config_from_code(period_code, start_day) {
        Ok(config) => config,
        Err(err) => {
            unsafe {
                write_core_error(out_error, err);
            }
            return CADENCE_ERR_VALIDATION;
        }
    };

    let window = PeriodCalculator::compute_window(&config, now);
    unsafe {
        *out_window = FfiPeriodWindow {
            period_start: window.period_start.into(),
            period_end: window.period_end.into(),
            days_until_reset: window.days_until_reset,
        };
    }
    CADENCE_OK
}

/// Computes the status of one recurring payment at `now`.
///
/// `frequency_code`: 0 weekly, 1 monthly, 2 quarterly, 3 yearly.
#[no_mangle]
pub extern "C" fn cadence_compute_status(
    frequency_code: c_int,
    next_expected_date: FfiDate,
    amount: c_double,
    now: FfiDateTime,
    out_status: *mut FfiRecurrenceStatus,
    out_error: *mut *mut c_char,
) -> c_int {
    clear_error(out_error);
    if out_status.is_null() {
        unsafe {
            write_error(out_error, "output status is null");
        }
        return CADENCE_ERR_NULL_OUTPUT;
    }
    let Some(frequency) = frequency_from_code(frequency_code) else {
        unsafe {
            write_error(out_error, &format!("unknown frequency code {frequency_code}"));
        }
        return CADENCE_ERR_INVALID_ARGUMENT;
    };
    let (Some(due), Some(now)) = (next_expected_date.to_naive(), now.to_naive()) else {
        unsafe {
            write_error(out_error, "date argument is not a supported calendar date");
        }
        return CADENCE_ERR_INVALID_ARGUMENT;
    };

    let config = match RecurrenceConfig::checked(frequency, due, amount, PreconditionPolicy::Reject) {
        Ok(config) => config,
        Err(err) => {
            unsafe {
                write_core_error(out_error, err);
            }
            return CADENCE_ERR_VALIDATION;
        }
    };

    let status = RecurrenceTracker::compute_status(&config, now);
    unsafe {
        *out_status = FfiRecurrenceStatus {
            days_until_due: status.days_until_due,
            urgency_tier: tier_to_code(status.urgency_tier),
            period_progress_percent: status.period_progress_percent,
            annual_cost: status.costs.annual_cost,
            monthly_average: status.costs.monthly_average,
            weekly_average: status.costs.weekly_average,
            daily_average: status.costs.daily_average,
        };
    }
    CADENCE_OK
}

/// Releases an error string produced by this library.
#[no_mangle]
pub extern "C" fn cadence_string_free(value: *mut c_char) {
    if value.is_null() {
        return;
    }
    unsafe {
        drop(CString::from_raw(value));
    }
}

fn period_config_from_code(code: c_int, start_day: c_int) -> Result<BudgetPeriodConfig, CoreError> {
    let day = u8::try_from(start_day)
        .map_err(|_| CoreError::Validation(format!("start day {start_day} is out of range")))?;
    match code {
        0 => BudgetPeriodConfig::weekly(day),
        1 => BudgetPeriodConfig::monthly(day),
        other => Err(CoreError::Validation(format!("unknown period code {other}"))),
    }
}

fn frequency_from_code(code: c_int) -> Option<Frequency> {
    match code {
        0 => Some(Frequency::Weekly),
        1 => Some(Frequency::Monthly),
        2 => Some(Frequency::Quarterly),
        3 => Some(Frequency::Yearly),
        _ => None,
    }
}

fn tier_to_code(tier: UrgencyTier) -> c_int {
    match tier {
        UrgencyTier::Overdue => 0,
        UrgencyTier::DueSoon => 1,
        UrgencyTier::ThisWeek => 2,
        UrgencyTier::Upcoming => 3,
    }
}

fn clear_error(out_error: *mut *mut c_char) {
    if out_error.is_null() {
        return;
    }
    unsafe {
        *out_error = ptr::null_mut();
    }
}

unsafe fn write_error(out_error: *mut *mut c_char, message: &str) {
    if out_error.is_null() {
        return;
    }
    if let Ok(cstring) = CString::new(message) {
        *out_error = cstring.into_raw();
    }
}

unsafe fn write_core_error(out_error: *mut *mut c_char, err: CoreError) {
    write_error(out_error, &err.to_string());
}
