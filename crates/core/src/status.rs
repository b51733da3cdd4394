//! Status enums for projects and tasks.
//!
//! Each variant maps to the text value stored in the `status` column of
//! the corresponding table (`in-progress` is hyphenated on the wire).

use crate::error::CoreError;

macro_rules! define_status_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $val:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Default, Clone, Copy, PartialEq, Eq, Hash,
            serde::Serialize, serde::Deserialize,
        )]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $val)] $variant ),+
        }

        impl $name {
            /// All variants in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Return the stored column value.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $val ),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $val => Ok($name::$variant), )+
                    other => Err(CoreError::Validation(format!(
                        "Invalid {} '{other}'. Must be one of: {:?}",
                        stringify!($name),
                        [$($val),+],
                    ))),
                }
            }
        }
    };
}

define_status_enum! {
    /// Project lifecycle status.
    ProjectStatus {
        #[default]
        Planned = "planned",
        InProgress = "in-progress",
        Completed = "completed",
    }
}

define_status_enum! {
    /// Task lifecycle status.
    TaskStatus {
        #[default]
        Todo = "todo",
        InProgress = "in-progress",
        Completed = "completed",
    }
}

impl TaskStatus {
    pub fn is_completed(self) -> bool {
        self == TaskStatus::Completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_progress_is_hyphenated_on_the_wire() {
        assert_eq!(
            serde_json::to_string(&TaskStatus::InProgress).unwrap(),
            "\"in-progress\""
        );
        let status: ProjectStatus = serde_json::from_str("\"in-progress\"").unwrap();
        assert_eq!(status, ProjectStatus::InProgress);
    }

    #[test]
    fn parse_rejects_unknown_value() {
        let err = "done".parse::<TaskStatus>().unwrap_err();
        assert!(err.to_string().contains("TaskStatus"));
    }

    #[test]
    fn defaults_match_new_form_values() {
        assert_eq!(ProjectStatus::default(), ProjectStatus::Planned);
        assert_eq!(TaskStatus::default(), TaskStatus::Todo);
    }

    #[test]
    fn all_lists_variants_in_order() {
        let names: Vec<_> = TaskStatus::ALL.iter().map(|s| s.as_str()).collect();
        assert_eq!(names, ["todo", "in-progress", "completed"]);
    }
}
