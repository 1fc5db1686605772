#![crate_name = "bitdt"]
#![crate_type = "rlib"]

#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]
//#![warn(missing_docs)]

#![warn(trivial_casts, trivial_numeric_casts)]
#![warn(unused_qualifications)]
#![warn(unused_results)]

//! Compact, reversible text encoding for date-time values.
//!
//! Every value packs into a single `u64`, so sorting by the packed number
//! sorts chronologically, and it has a short text form built from small
//! per-field alphabets with runs of absent fields squeezed together.
//! Epoch timestamps can also be written in any base from 2 to 36.
//!
//! # Examples
//!
//! ```
//! use bitdt::{BitDateTime, Fields, Offset};
//! use bitdt::epoch::{self, Mode};
//!
//! let fields = Fields::date(52_024, 5, 14).with_time(5, 34, 16, 789);
//! let value = BitDateTime::new(fields, Offset::utc()).unwrap();
//! assert_eq!(value.encode(), "N81FNGiQpO");
//! assert_eq!(BitDateTime::decode("N81FNGiQpO"), value);
//!
//! assert_eq!(epoch::to_text(1_718_323_456_789, None, Mode::Auto), "LXDXF4T1");
//! assert_eq!(epoch::from_text("LXDXF4T1", None), Some(1_718_323_456_789));
//! ```

pub mod alphabet;
pub mod cal;
pub mod codec;
pub mod epoch;
mod fmt;
pub mod offset;
pub mod packed;
pub mod radix;
mod system;
pub mod zeros;

#[cfg(feature = "parse")]
pub mod parse;

pub use crate::alphabet::{Field, RangeError};
pub use crate::cal::CivilDateTime;
pub use crate::codec::DecodeError;
pub use crate::epoch::Mode;
pub use crate::fmt::Iso;
pub use crate::offset::Offset;
pub use crate::packed::{BitDateTime, DateType, Fields};
pub use crate::system::now_millis;
