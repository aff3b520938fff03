use std::fmt::{self, Display, Formatter};

use serde_derive::Deserialize;

mod sphere;

pub use self::sphere::Sphere;

/// Identity of a scene object. Point lights share the id of the sphere that represents them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(pub u32);

impl Display for ObjectId {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
