/*!
 Resolves the `$objects` table of a keyed archive into a graph of [`Hydrated`] values.

 The walker keeps its own stack of partially built containers instead of recursing, so deeply
 nested archives cannot exhaust the call stack. Every table entry is decoded at most once; later
 references receive a clone of the cached value, which shares its allocation with the first decoded value.
*/

use std::{slice, time::SystemTime};

use chrono::{DateTime, Utc};
use plist::{dictionary, Value};

use crate::{
    error::archive::ArchiveError,
    hydrators::registry::HydratorRegistry,
    models::{Hydrated, Properties},
    util::plist::plist_type_name,
};

/// Marks a dictionary as an archived object; points to its class declaration
pub const CLASS_KEY: &str = "$class";
/// Name of the native class in a class declaration
pub const CLASS_NAME_KEY: &str = "$classname";
/// Class hierarchy in a class declaration
pub const CLASS_CHAIN_KEY: &str = "$classes";
/// String stored in place of a null reference
pub const NULL_MARKER: &str = "$null";

/// The native class of an archived object and the classes it inherits from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassMetadata {
    pub native_class: String,
    /// Most derived class first, if the archive recorded it
    pub class_chain: Option<Vec<String>>,
}

impl ClassMetadata {
    /// Read the metadata out of a decoded `$class` declaration
    pub fn from_declaration(declaration: &Hydrated) -> Result<Self, ArchiveError> {
        let declaration = declaration.as_dictionary().ok_or_else(|| {
            ArchiveError::Malformed(format!(
                "Expected object declaration to be a dictionary, got {}",
                declaration.kind()
            ))
        })?;

        let native_class = match declaration.get(CLASS_NAME_KEY) {
            None | Some(Hydrated::Null) => {
                return Err(ArchiveError::malformed_reference("class name is missing"))
            }
            Some(Hydrated::String(name)) => name.clone(),
            Some(other) => {
                return Err(ArchiveError::malformed_reference(format!(
                    "class name is not a string (found {})",
                    other.kind()
                )))
            }
        };

        let class_chain = match declaration.get(CLASS_CHAIN_KEY) {
            None | Some(Hydrated::Null) => None,
            Some(Hydrated::Array(chain)) => Some(
                chain
                    .iter()
                    .map(|class| match class {
                        Hydrated::String(name) => Ok(name.clone()),
                        other => Err(ArchiveError::malformed_reference(format!(
                            "class chain contains a non-string entry (found {})",
                            other.kind()
                        ))),
                    })
                    .collect::<Result<Vec<String>, ArchiveError>>()?,
            ),
            Some(other) => {
                return Err(ArchiveError::malformed_reference(format!(
                    "class chain is not an array (found {})",
                    other.kind()
                )))
            }
        };

        Ok(Self {
            native_class,
            class_chain,
        })
    }
}

/// State of an entry in the reference cache
#[derive(Debug)]
enum Slot {
    Unvisited,
    /// The entry is being decoded; meeting it again means it contains itself
    InProgress,
    Resolved(Hydrated),
}

/// A container that is waiting for its children to be decoded
enum Frame<'a> {
    List {
        items: slice::Iter<'a, Value>,
        done: Vec<Hydrated>,
    },
    Map {
        entries: dictionary::Iter<'a>,
        pending: Option<&'a String>,
        done: Properties,
    },
    /// The class declaration is decoded first, then the properties
    Object {
        declaration: Option<&'a Value>,
        class: Option<ClassMetadata>,
        entries: dictionary::Iter<'a>,
        pending: Option<&'a String>,
        done: Properties,
    },
    /// A table entry whose value is cached once decoded
    Reference {
        index: usize,
        entry: Option<&'a Value>,
        value: Option<Hydrated>,
    },
}

impl<'a> Frame<'a> {
    /// The next node this frame needs decoded, if any
    fn next_child(&mut self) -> Option<&'a Value> {
        match self {
            Frame::List { items, .. } => items.next(),
            Frame::Map {
                entries, pending, ..
            } => entries.next().map(|(key, value)| {
                *pending = Some(key);
                value
            }),
            Frame::Object {
                declaration,
                entries,
                pending,
                ..
            } => declaration.take().or_else(|| {
                entries
                    .find(|(key, _)| key.as_str() != CLASS_KEY)
                    .map(|(key, value)| {
                        *pending = Some(key);
                        value
                    })
            }),
            Frame::Reference { entry, .. } => entry.take(),
        }
    }

    /// Store the decoded value of the child returned by [`Frame::next_child`]
    fn accept(&mut self, child: Hydrated) -> Result<(), ArchiveError> {
        match self {
            Frame::List { done, .. } => done.push(child),
            Frame::Map { pending, done, .. } => {
                if let Some(key) = pending.take() {
                    done.insert(key.clone(), child);
                }
            }
            Frame::Object {
                class,
                pending,
                done,
                ..
            } => match pending.take() {
                Some(key) => {
                    done.insert(key.clone(), child);
                }
                None => *class = Some(ClassMetadata::from_declaration(&child)?),
            },
            Frame::Reference { value, .. } => *value = Some(child),
        }
        Ok(())
    }
}

/// Convert a node that does not reference anything else
fn scalar(node: &Value) -> Result<Hydrated, ArchiveError> {
    Ok(match node {
        Value::Boolean(flag) => Hydrated::Boolean(*flag),
        Value::Integer(num) => match (num.as_signed(), num.as_unsigned()) {
            (Some(signed), _) => Hydrated::SignedInteger(signed),
            (None, Some(unsigned)) => Hydrated::UnsignedInteger(unsigned),
            (None, None) => {
                return Err(ArchiveError::Malformed(format!(
                    "Integer {num} does not fit in 64 bits"
                )))
            }
        },
        Value::Real(num) => Hydrated::Real(*num),
        Value::String(text) => Hydrated::String(text.clone()),
        Value::Data(bytes) => Hydrated::Data(bytes.clone()),
        Value::Date(date) => Hydrated::Date(DateTime::<Utc>::from(SystemTime::from(*date))),
        other => {
            return Err(ArchiveError::Malformed(format!(
                "Unexpected wrapped type {} found while resolving structure",
                plist_type_name(other)
            )))
        }
    })
}

/// Decodes nodes of one archive, caching every table entry it resolves
///
/// Only resolved entries survive a failed call; the walker can be reused afterwards.
pub struct GraphWalker<'a> {
    /// The archive's `$objects` table
    objects: &'a [Value],
    registry: &'a HydratorRegistry,
    cache: Vec<Slot>,
    /// Maximum number of nested containers and objects, if limited
    max_depth: Option<usize>,
    /// Number of containers and objects currently open
    depth: usize,
}

impl<'a> GraphWalker<'a> {
    pub fn new(objects: &'a [Value], registry: &'a HydratorRegistry) -> Self {
        Self {
            objects,
            registry,
            cache: objects.iter().map(|_| Slot::Unvisited).collect(),
            max_depth: None,
            depth: 0,
        }
    }

    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Decode a node, resolving everything it references
    pub fn walk<'n>(&mut self, node: &'n Value) -> Result<Hydrated, ArchiveError>
    where
        'a: 'n,
    {
        let mut stack = vec![];
        let result = self
            .enter(node, &mut stack)
            .and_then(|produced| self.drive(stack, produced));
        self.settle(result)
    }

    /// Decode the object table entry at `index`
    ///
    /// Resolving the same index twice yields the same value; containers and objects share their allocation.
    pub fn resolve_reference(&mut self, index: usize) -> Result<Hydrated, ArchiveError> {
        let mut stack = vec![];
        let result = self
            .enter_reference(index as u64, &mut stack)
            .and_then(|produced| self.drive(stack, produced));
        self.settle(result)
    }

    /// Forget the entries and depth an aborted call left open
    fn settle(&mut self, result: Result<Hydrated, ArchiveError>) -> Result<Hydrated, ArchiveError> {
        if result.is_err() {
            self.cache
                .iter_mut()
                .filter(|slot| matches!(slot, Slot::InProgress))
                .for_each(|slot| *slot = Slot::Unvisited);
            self.depth = 0;
        }
        result
    }

    /// Run the stack until the bottom frame produces a value
    fn drive<'n>(
        &mut self,
        mut stack: Vec<Frame<'n>>,
        mut produced: Option<Hydrated>,
    ) -> Result<Hydrated, ArchiveError>
    where
        'a: 'n,
    {
        loop {
            if let Some(value) = produced.take() {
                match stack.last_mut() {
                    Some(frame) => frame.accept(value)?,
                    None => return Ok(value),
                }
            }

            let child = match stack.last_mut() {
                Some(frame) => frame.next_child(),
                None => {
                    return Err(ArchiveError::Malformed(
                        "Structure ended without producing a value".to_string(),
                    ))
                }
            };

            produced = match child {
                Some(child) => self.enter(child, &mut stack)?,
                None => match stack.pop() {
                    Some(frame) => Some(self.finish(frame)?),
                    None => None,
                },
            };
        }
    }

    /// Start decoding `node`: returns its value directly, or pushes a frame and returns [`None`]
    fn enter<'n>(
        &mut self,
        node: &'n Value,
        stack: &mut Vec<Frame<'n>>,
    ) -> Result<Option<Hydrated>, ArchiveError>
    where
        'a: 'n,
    {
        let frame = match node {
            Value::Uid(uid) => return self.enter_reference(uid.get(), stack),
            Value::String(text) if text == NULL_MARKER => return Ok(Some(Hydrated::Null)),
            Value::Dictionary(dict) if dict.contains_key(CLASS_KEY) => Frame::Object {
                declaration: dict.get(CLASS_KEY),
                class: None,
                entries: dict.iter(),
                pending: None,
                done: Properties::new(),
            },
            Value::Dictionary(dict) => Frame::Map {
                entries: dict.iter(),
                pending: None,
                done: Properties::new(),
            },
            Value::Array(items) => Frame::List {
                items: items.iter(),
                done: Vec::with_capacity(items.len()),
            },
            other => return scalar(other).map(Some),
        };

        if let Some(limit) = self.max_depth {
            if self.depth >= limit {
                return Err(ArchiveError::DepthExceeded(limit));
            }
        }
        self.depth += 1;
        stack.push(frame);
        Ok(None)
    }

    fn enter_reference<'n>(
        &mut self,
        uid: u64,
        stack: &mut Vec<Frame<'n>>,
    ) -> Result<Option<Hydrated>, ArchiveError>
    where
        'a: 'n,
    {
        let entry = usize::try_from(uid)
            .ok()
            .and_then(|index| Some((index, self.cache.get(index)?)));
        match entry {
            None => Err(ArchiveError::DanglingReference(uid)),
            Some((_, Slot::Resolved(value))) => Ok(Some(value.clone())),
            Some((index, Slot::InProgress)) => Err(ArchiveError::CircularReference(index)),
            Some((index, Slot::Unvisited)) => {
                self.cache[index] = Slot::InProgress;
                stack.push(Frame::Reference {
                    index,
                    entry: self.objects.get(index),
                    value: None,
                });
                Ok(None)
            }
        }
    }

    /// Build the value of a frame whose children are all decoded
    fn finish(&mut self, frame: Frame<'_>) -> Result<Hydrated, ArchiveError> {
        if !matches!(frame, Frame::Reference { .. }) {
            self.depth = self.depth.saturating_sub(1);
        }

        match frame {
            Frame::List { done, .. } => Ok(Hydrated::array(done)),
            Frame::Map { done, .. } => Ok(Hydrated::dictionary(done)),
            Frame::Object { class, done, .. } => {
                let class = class.ok_or_else(|| {
                    ArchiveError::malformed_reference("class declaration is missing")
                })?;
                self.registry
                    .dispatch(&class.native_class, class.class_chain.as_deref(), done)
            }
            Frame::Reference { index, value, .. } => {
                let value = value.ok_or(ArchiveError::DanglingReference(index as u64))?;
                self.cache[index] = Slot::Resolved(value.clone());
                Ok(value)
            }
        }
    }
}
