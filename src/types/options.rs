// src/types/options.rs
//! Fixed choice lists offered by the forms

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::PortalError;

/// Declares a select-box option set: wire value, display label, parsing.
macro_rules! choice_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => ($value:literal, $label:literal)),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $value)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn value(self) -> &'static str {
                match self {
                    $($name::$variant => $value),+
                }
            }

            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl FromStr for $name {
            type Err = PortalError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|choice| choice.value() == s)
                    .ok_or_else(|| {
                        PortalError::validation(format!(
                            "Unknown {}: {}",
                            stringify!($name),
                            s
                        ))
                    })
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.value())
            }
        }
    };
}

choice_enum! {
    /// Job categories a résumé can be analysed against
    JobPosition {
        Backend => ("backend", "백엔드 개발자"),
        Frontend => ("frontend", "프론트엔드 개발자"),
        Fullstack => ("fullstack", "풀스택 개발자"),
        Ai => ("ai", "AI/ML 엔지니어"),
        Devops => ("devops", "DevOps 엔지니어"),
        Mobile => ("mobile", "모바일 개발자"),
        Data => ("data", "데이터 사이언티스트"),
    }
}

choice_enum! {
    ExperienceLevel {
        Entry => ("0", "신입"),
        OneYear => ("1", "1년차"),
        TwoYears => ("2", "2년차"),
        ThreeYears => ("3", "3년차"),
        FourYears => ("4", "4년차"),
        FivePlus => ("5+", "5년차 이상"),
    }
}

choice_enum! {
    CoverLetterStyle {
        Professional => ("professional", "전문적이고 간결한 스타일"),
        Creative => ("creative", "창의적이고 열정적인 스타일"),
        Practical => ("practical", "경험 중심의 실무적 스타일"),
    }
}

impl CoverLetterStyle {
    /// Label for a style string as stored by the backend; unknown styles show verbatim
    pub fn label_for(raw: &str) -> String {
        raw.parse::<CoverLetterStyle>()
            .map(|style| style.label().to_string())
            .unwrap_or_else(|_| raw.to_string())
    }
}
