#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

pub mod error;
pub mod hydrators;
pub mod models;
pub mod native_types;
pub mod unarchiver;
pub mod util;
pub mod validator;

pub use crate::{
    error::archive::ArchiveError,
    models::{Hydrated, Properties},
    unarchiver::NSKeyedUnarchiver,
    util::plist::PlistFormat,
};
