//! JSON paths for error messages.

use std::fmt;

/// One step of a JSON path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaPathElem {
    /// Object member.
    Field(&'static str),
    /// Array element.
    Index(usize),
}

/// Location of a value inside the mesh document, rendered as `$.keyframes[0][1].lambert`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaPath(Vec<SchemaPathElem>);

impl SchemaPath {
    /// The document root, `$`.
    pub fn root() -> Self {
        Self::default()
    }

    /// Path to member `name` of the value at `self`.
    pub fn field(&self, name: &'static str) -> Self {
        self.child(SchemaPathElem::Field(name))
    }

    /// Path to element `i` of the array at `self`.
    pub fn index(&self, i: usize) -> Self {
        self.child(SchemaPathElem::Index(i))
    }

    /// Path elements from the root.
    pub fn elems(&self) -> &[SchemaPathElem] {
        &self.0
    }

    fn child(&self, elem: SchemaPathElem) -> Self {
        let mut elems = Vec::with_capacity(self.0.len() + 1);
        elems.extend_from_slice(&self.0);
        elems.push(elem);
        Self(elems)
    }
}

impl fmt::Display for SchemaPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for p in &self.0 {
            match *p {
                SchemaPathElem::Field(name) => write!(f, ".{name}")?,
                SchemaPathElem::Index(i) => write!(f, "[{i}]")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schema/path.rs"]
mod tests;
