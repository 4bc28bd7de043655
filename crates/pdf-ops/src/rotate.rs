//! Page rotation

use crate::pages::{inherited_attribute, page_ids};
use crate::types::*;
use lopdf::{Document, Object};
use log::debug;

/// Clockwise rotation applied to every page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    #[default]
    Clockwise90,
    Clockwise180,
    Clockwise270,
}

impl Rotation {
    pub fn degrees(self) -> i64 {
        match self {
            Rotation::Clockwise90 => 90,
            Rotation::Clockwise180 => 180,
            Rotation::Clockwise270 => 270,
        }
    }
}

impl TryFrom<u16> for Rotation {
    type Error = OpsError;

    fn try_from(degrees: u16) -> Result<Self> {
        match degrees {
            90 => Ok(Rotation::Clockwise90),
            180 => Ok(Rotation::Clockwise180),
            270 => Ok(Rotation::Clockwise270),
            other => Err(OpsError::InvalidRotation(other)),
        }
    }
}

/// Add `rotation` to every page's `/Rotate`, returning the page count.
pub fn rotate_document(doc: &mut Document, rotation: Rotation) -> Result<usize> {
    let ids = page_ids(doc)?;
    let total = ids.len();

    for (index, page_id) in ids.into_iter().enumerate() {
        let current = inherited_attribute(doc, page_id, b"Rotate")
            .and_then(|obj| obj.as_i64().ok())
            .unwrap_or(0);
        let rotated = (current + rotation.degrees()).rem_euclid(360);

        doc.get_dictionary_mut(page_id)?
            .set("Rotate", Object::Integer(rotated));
        debug!("  [{}/{}] Rotated page {} to {}", index + 1, total, index + 1, rotated);
    }

    Ok(total)
}
