//! The custom object table.
//!
//! The generator artifact embeds symbolic names for the one custom graph
//! operator it uses and for the losses it was trained with. The table maps
//! those names to concrete definitions so the graph can be reconstructed;
//! loading fails if any referenced name is missing.

use std::collections::BTreeMap;

use ort::operator::OperatorDomain;

use crate::error::{Error, Result};
use crate::ops::losses::{self, LossFn};
use crate::ops::ReflectionPad2d;

/// Operator domain the custom graph operators are registered under.
pub const CUSTOM_DOMAIN: &str = "deblur";

/// Names the shipped generator artifact references.
pub const REQUIRED_CUSTOM_OBJECTS: &[&str] = &[
    "ReflectionPadding2D",
    "perceptual_loss",
    "wasserstein_loss",
    "edge_loss",
    "generator_loss",
    "discriminator_loss",
    "gradient_penalty",
    "custom_lambda",
];

/// A named definition the serialized graph may reference.
#[derive(Debug, Clone, Copy)]
pub enum CustomObject {
    /// Graph operator, registered with the runtime session.
    Layer(ReflectionPad2d),
    /// Training-time loss; resolvable by name, never invoked here.
    Loss(LossFn),
    /// Elementwise stand-in for `Lambda` nodes.
    Lambda(fn(f32) -> f32),
}

/// Mapping from symbolic names to the definitions needed at load time.
#[derive(Debug, Clone)]
pub struct CustomObjects {
    entries: BTreeMap<&'static str, CustomObject>,
}

impl CustomObjects {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// The full table for the deblurring generator.
    #[must_use]
    pub fn for_generator() -> Self {
        let mut table = Self::new();

        table.insert(
            "ReflectionPadding2D",
            CustomObject::Layer(ReflectionPad2d::default()),
        );
        table.insert("perceptual_loss", CustomObject::Loss(losses::perceptual_loss));
        table.insert("wasserstein_loss", CustomObject::Loss(losses::wasserstein_loss));
        table.insert("edge_loss", CustomObject::Loss(losses::edge_loss));
        table.insert("generator_loss", CustomObject::Loss(losses::generator_loss));
        table.insert(
            "discriminator_loss",
            CustomObject::Loss(losses::discriminator_loss),
        );
        table.insert("gradient_penalty", CustomObject::Loss(losses::gradient_penalty));
        table.insert("custom_lambda", CustomObject::Lambda(losses::custom_lambda));

        table
    }

    /// Add an entry to the table.
    pub fn insert(&mut self, name: &'static str, object: CustomObject) {
        self.entries.insert(name, object);
    }

    /// Whether the table has an entry for `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Check the table against the names an artifact references.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first reference the table does not
    /// provide.
    pub fn validate(&self, required: &[&str]) -> Result<()> {
        for &name in required {
            if !self.contains(name) {
                return Err(Error::MissingCustomObject {
                    name: name.to_string(),
                });
            }
        }

        Ok(())
    }

    /// Build the operator domain holding the table's graph operators.
    pub(crate) fn operator_domain(&self) -> ort::Result<OperatorDomain> {
        let mut domain = OperatorDomain::new(CUSTOM_DOMAIN)?;

        for object in self.entries.values() {
            if let CustomObject::Layer(op) = object {
                domain = domain.add(*op)?;
            }
        }

        Ok(domain)
    }
}

impl Default for CustomObjects {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generator_table_is_complete() {
        let table = CustomObjects::for_generator();

        assert!(table.validate(REQUIRED_CUSTOM_OBJECTS).is_ok());
    }

    #[test]
    fn test_incomplete_table_names_the_gap() {
        let mut table = CustomObjects::new();
        table.insert(
            "ReflectionPadding2D",
            CustomObject::Layer(ReflectionPad2d::default()),
        );

        let err = table.validate(REQUIRED_CUSTOM_OBJECTS).unwrap_err();
        match err {
            Error::MissingCustomObject { name } => assert_eq!(name, "perceptual_loss"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_requirements_always_pass() {
        assert!(CustomObjects::new().validate(&[]).is_ok());
    }
}
