use std::collections::HashSet;

use log::{debug, warn};

use crate::{
    error::LinkError,
    vertex::{Attribute, Layout},
};

pub const A_POSITION: u32 = 0;
pub const A_COLOR: u32 = 1;

/// A vertex layout checked against the `transform` shader's interface.
#[derive(Debug, Clone)]
pub struct Program {
    layout: Layout,
    position: Attribute,
    color: Attribute,
}

impl Program {
    pub fn link(layout: Layout) -> Result<Self, LinkError> {
        validate_bindings(&layout)?;
        validate_attributes(&layout)?;

        let position = find(&layout, "a_position", A_POSITION)?;
        let color = find(&layout, "a_color", A_COLOR)?;

        for attribute in &layout.attributes {
            if attribute.location != A_POSITION && attribute.location != A_COLOR {
                warn!(
                    "koi::program - attribute at location {} is not consumed by the shader",
                    attribute.location
                );
            }
        }

        debug!(
            "koi::program - linked a_position {:?} @ binding {}, a_color {:?} @ binding {}",
            position.format, position.binding, color.format, color.binding
        );

        Ok(Self {
            layout,
            position,
            color,
        })
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn position(&self) -> &Attribute {
        &self.position
    }

    pub fn color(&self) -> &Attribute {
        &self.color
    }

    /// Bindings the shader actually reads from.
    pub fn used_bindings(&self) -> impl Iterator<Item = u32> + '_ {
        let color = (self.color.binding != self.position.binding).then_some(self.color.binding);
        std::iter::once(self.position.binding).chain(color)
    }
}

fn find(layout: &Layout, name: &'static str, location: u32) -> Result<Attribute, LinkError> {
    layout
        .find_attribute(location)
        .copied()
        .ok_or(LinkError::MissingAttribute { name, location })
}

fn validate_bindings(layout: &Layout) -> Result<(), LinkError> {
    let mut seen = HashSet::new();
    match layout.bindings.iter().find(|b| !seen.insert(b.binding)) {
        Some(duplicate) => Err(LinkError::DuplicateBinding(duplicate.binding)),
        None => Ok(()),
    }
}

fn validate_attributes(layout: &Layout) -> Result<(), LinkError> {
    let mut seen = HashSet::new();

    for attribute in &layout.attributes {
        if !seen.insert(attribute.location) {
            return Err(LinkError::DuplicateLocation(attribute.location));
        }

        let binding = layout
            .find_binding(attribute.binding)
            .ok_or(LinkError::UndeclaredBinding {
                location: attribute.location,
                binding: attribute.binding,
            })?;

        let end = attribute
            .end()
            .ok_or(LinkError::AttributeOffsetOverflow {
                location: attribute.location,
                offset: attribute.offset,
            })?;

        if binding.stride > 0 && end > binding.stride {
            return Err(LinkError::AttributeOutsideStride {
                location: attribute.location,
                binding: binding.binding,
                end,
                stride: binding.stride,
            });
        }
    }

    Ok(())
}
