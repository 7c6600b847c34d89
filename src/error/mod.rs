/*!
 Errors that can happen when decoding keyed archives.
*/

pub mod archive;
