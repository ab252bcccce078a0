/// Smallest year accepted as a structurally valid date (four digits)
pub const MIN_VALID_YEAR: i32 = 1000;
/// Largest year accepted as a structurally valid date (four digits)
pub const MAX_VALID_YEAR: i32 = 9999;

/// Number of months in a year
pub const MONTHS_PER_YEAR: u8 = 12;

/// First day of month, used for lower bounds
pub const MIN_DAY: u8 = 1;

/// Zero-based month index for January
pub const JANUARY: u8 = 0;
/// Zero-based month index for February
pub const FEBRUARY: u8 = 1;
/// Zero-based month index for December
pub const DECEMBER: u8 = 11;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Maximum days in each month, indexed by zero-based month.
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 12] = [
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: i32 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: i32 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: i32 = 400;

/// Years per decade page in the year selector
pub const DECADE: i32 = 10;

/// Days per week, the width of the month grid
pub const DAYS_PER_WEEK: usize = 7;

/// Default first column of the month grid (Monday, with Sunday = 0)
pub const DEFAULT_START_WEEK_DAY: u8 = 1;

/// Date component separator
pub const DATE_SEPARATOR: char = '-';
/// Separator between the min and max side of a range string
pub const RANGE_SEPARATOR: char = ':';
/// Range keyword resolving to the current date
pub const NOW_KEYWORD: &str = "NOW";
