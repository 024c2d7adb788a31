//! Unique scratch-variable names for generated code
//!
//! A [`VarNameGenerator`] is owned by one code-generation session and passed
//! to whatever emits helper code. Names never repeat within a session.

use std::fmt::Display;

/// Prefix shared by every generated name
pub const PREFIX: &str = "utils";

/// Counter-backed source of fresh variable names
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VarNameGenerator {
    next_id: u64,
}

impl VarNameGenerator {
    /// Creates a generator whose first name has id `0`
    #[must_use]
    pub const fn new() -> Self {
        Self { next_id: 0 }
    }

    /// Creates a generator whose first name has id `id`, to resume a session
    #[must_use]
    pub const fn starting_at(id: u64) -> Self {
        Self { next_id: id }
    }

    /// Id that the next call to [`next`](Self::next) will use
    #[must_use]
    pub const fn peek_id(&self) -> u64 {
        self.next_id
    }

    /// Returns a fresh name, `utils_<id>` or `utils_<id>_<postfix>`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mutils::codegen::VarNameGenerator;
    /// let mut names = VarNameGenerator::new();
    /// assert_eq!(names.next(None::<&str>), "utils_0");
    /// assert_eq!(names.next(Some("acc")), "utils_1_acc");
    /// ```
    pub fn next<T: Display>(&mut self, postfix: Option<T>) -> String {
        let id = self.next_id;
        self.next_id += 1;
        match postfix {
            Some(postfix) => format!("{PREFIX}_{id}_{postfix}"),
            None => format!("{PREFIX}_{id}"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn names_are_sequential() {
        let mut names = VarNameGenerator::new();
        assert_eq!(names.next(Some("x")), "utils_0_x");
        assert_eq!(names.next(None::<&str>), "utils_1");
        assert_eq!(names.next(Some(7)), "utils_2_7");
        assert_eq!(names.peek_id(), 3);
    }

    #[test]
    fn sessions_are_independent() {
        let mut a = VarNameGenerator::default();
        let mut b = VarNameGenerator::starting_at(40);
        assert_eq!(a.next(None::<&str>), "utils_0");
        assert_eq!(b.next(None::<&str>), "utils_40");
        assert_eq!(a.next(None::<&str>), "utils_1");
    }
}
