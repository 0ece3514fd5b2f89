//! Crate prelude.

// The actual prelude.
pub use crate::{
    card::{Cardinality, Classifier},
    dispatch::{Dispatcher, Op, Repr},
    error::SetError,
    ext,
    ext::ExtensionalSet,
    int::{Domain, IntensionalSet, SetId},
    iter::Elements,
    limits::Limits,
    pair::OrderedPair,
    pred::Predicate,
    set::Set,
    universe::Universe,
    Element, SetTrait,
};

// Convenient imports within the crate.
pub(crate) use crate::{set, Seal, SmallVec};
pub(crate) use bitvec::prelude::*;
pub(crate) use derive_more::{Display, From};
pub(crate) use log::{debug, trace};
pub(crate) use std::{
    cmp::Ordering,
    collections::{HashMap, HashSet},
    fmt::{Debug, Display, Formatter, Result as FmtResult},
    hash::{Hash, Hasher},
    sync::Arc,
};
