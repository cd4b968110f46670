use serde::{Deserialize, Serialize};
use std::{borrow::Cow, fmt};

/// The value type a bound parameter or column is converted to on the host side.
///
/// Host types are independent of the driver: the wire type used to talk to the
/// server is resolved next to the driver and never leaves the adapter.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum HostType {
    Boolean,
    Int16,
    Int32,
    Int64,
    Single,
    Double,
    Decimal,
    String,
    Bytes,
    BitString,
    Uuid,
    Date,
    Time,
    Timestamp,
    TimestampTz,
    AbsoluteTime,
    Interval,
    Inet,
    MacAddress,
    Point,
    Box,
    Circle,
    LineSegment,
    Path,
    Polygon,
    /// Composite row returned by functions with OUT parameters.
    Record,
    /// Return slot of a routine that produces nothing.
    Void,
}

impl HostType {
    pub fn name(&self) -> Cow<'_, str> {
        match self {
            HostType::Boolean => Cow::Borrowed("Boolean"),
            HostType::Int16 => Cow::Borrowed("Int16"),
            HostType::Int32 => Cow::Borrowed("Int32"),
            HostType::Int64 => Cow::Borrowed("Int64"),
            HostType::Single => Cow::Borrowed("Single"),
            HostType::Double => Cow::Borrowed("Double"),
            HostType::Decimal => Cow::Borrowed("Decimal"),
            HostType::String => Cow::Borrowed("String"),
            HostType::Bytes => Cow::Borrowed("Bytes"),
            HostType::BitString => Cow::Borrowed("BitString"),
            HostType::Uuid => Cow::Borrowed("Uuid"),
            HostType::Date => Cow::Borrowed("Date"),
            HostType::Time => Cow::Borrowed("Time"),
            HostType::Timestamp => Cow::Borrowed("Timestamp"),
            HostType::TimestampTz => Cow::Borrowed("TimestampTz"),
            HostType::AbsoluteTime => Cow::Borrowed("AbsoluteTime"),
            HostType::Interval => Cow::Borrowed("Interval"),
            HostType::Inet => Cow::Borrowed("Inet"),
            HostType::MacAddress => Cow::Borrowed("MacAddress"),
            HostType::Point => Cow::Borrowed("Point"),
            HostType::Box => Cow::Borrowed("Box"),
            HostType::Circle => Cow::Borrowed("Circle"),
            HostType::LineSegment => Cow::Borrowed("LineSegment"),
            HostType::Path => Cow::Borrowed("Path"),
            HostType::Polygon => Cow::Borrowed("Polygon"),
            HostType::Record => Cow::Borrowed("Record"),
            HostType::Void => Cow::Borrowed("Void"),
        }
    }

    /// Variable-length text. The server cannot report how much room these need,
    /// so bindings for them are always over-allocated.
    pub fn is_text(&self) -> bool {
        matches!(self, HostType::String)
    }
}

impl fmt::Display for HostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
