use std::fmt;

use serde::{Deserialize, Serialize};

/// The closed set of instantiation kinds a trace can report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum InstantiationKind {
    TemplateInstantiation,
    DefaultTemplateArgumentInstantiation,
    DefaultFunctionArgumentInstantiation,
    ExplicitTemplateArgumentSubstitution,
    DeducedTemplateArgumentSubstitution,
    PriorTemplateArgumentSubstitution,
    DefaultTemplateArgumentChecking,
    ExceptionSpecInstantiation,
    /// A cached result; rendered as a leaf and never expanded
    Memoization,
}

impl InstantiationKind {
    pub const ALL: [InstantiationKind; 9] = [
        InstantiationKind::TemplateInstantiation,
        InstantiationKind::DefaultTemplateArgumentInstantiation,
        InstantiationKind::DefaultFunctionArgumentInstantiation,
        InstantiationKind::ExplicitTemplateArgumentSubstitution,
        InstantiationKind::DeducedTemplateArgumentSubstitution,
        InstantiationKind::PriorTemplateArgumentSubstitution,
        InstantiationKind::DefaultTemplateArgumentChecking,
        InstantiationKind::ExceptionSpecInstantiation,
        InstantiationKind::Memoization,
    ];

    /// Map an external kind code; `None` for anything outside the closed set
    pub fn from_code(code: i32) -> Option<Self> {
        usize::try_from(code).ok().and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn code(self) -> i32 {
        match self {
            InstantiationKind::TemplateInstantiation => 0,
            InstantiationKind::DefaultTemplateArgumentInstantiation => 1,
            InstantiationKind::DefaultFunctionArgumentInstantiation => 2,
            InstantiationKind::ExplicitTemplateArgumentSubstitution => 3,
            InstantiationKind::DeducedTemplateArgumentSubstitution => 4,
            InstantiationKind::PriorTemplateArgumentSubstitution => 5,
            InstantiationKind::DefaultTemplateArgumentChecking => 6,
            InstantiationKind::ExceptionSpecInstantiation => 7,
            InstantiationKind::Memoization => 8,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            InstantiationKind::TemplateInstantiation => "TemplateInstantiation",
            InstantiationKind::DefaultTemplateArgumentInstantiation => {
                "DefaultTemplateArgumentInstantiation"
            }
            InstantiationKind::DefaultFunctionArgumentInstantiation => {
                "DefaultFunctionArgumentInstantiation"
            }
            InstantiationKind::ExplicitTemplateArgumentSubstitution => {
                "ExplicitTemplateArgumentSubstitution"
            }
            InstantiationKind::DeducedTemplateArgumentSubstitution => {
                "DeducedTemplateArgumentSubstitution"
            }
            InstantiationKind::PriorTemplateArgumentSubstitution => {
                "PriorTemplateArgumentSubstitution"
            }
            InstantiationKind::DefaultTemplateArgumentChecking => "DefaultTemplateArgumentChecking",
            InstantiationKind::ExceptionSpecInstantiation => "ExceptionSpecInstantiation",
            InstantiationKind::Memoization => "Memoization",
        }
    }

    /// Substitution and checking steps that mean little to a user on their own.
    /// Outside full mode, such frames are dropped when nothing was kept below them.
    pub fn is_bookkeeping(self) -> bool {
        match self {
            InstantiationKind::ExplicitTemplateArgumentSubstitution
            | InstantiationKind::DeducedTemplateArgumentSubstitution
            | InstantiationKind::PriorTemplateArgumentSubstitution
            | InstantiationKind::DefaultTemplateArgumentChecking => true,
            InstantiationKind::TemplateInstantiation
            | InstantiationKind::DefaultTemplateArgumentInstantiation
            | InstantiationKind::DefaultFunctionArgumentInstantiation
            | InstantiationKind::ExceptionSpecInstantiation
            | InstantiationKind::Memoization => false,
        }
    }
}

impl fmt::Display for InstantiationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
