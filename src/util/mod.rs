pub mod dates;
pub mod plist;
