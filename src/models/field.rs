use serde::{Deserialize, Serialize};
use std::fmt;

/// Suffix carried by the two binary-choice section labels of the template
pub const BINARY_CHOICE_SUFFIX: &str = "(受影响/不受影响)";

/// One of the ten sections of the defect template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldTag {
    Kernel,
    Components,
    SystemVersion,
    Description,
    ReferenceUrl,
    GuidanceUrl,
    Influence,
    SeverityLevel,
    AffectedVersionBlock,
    Abi,
}

impl FieldTag {
    pub const COUNT: usize = 10;

    /// All tags in template order
    pub const ALL: [FieldTag; FieldTag::COUNT] = [
        FieldTag::Kernel,
        FieldTag::Components,
        FieldTag::SystemVersion,
        FieldTag::Description,
        FieldTag::ReferenceUrl,
        FieldTag::GuidanceUrl,
        FieldTag::Influence,
        FieldTag::SeverityLevel,
        FieldTag::AffectedVersionBlock,
        FieldTag::Abi,
    ];

    /// Section label as written in the template, used in user-facing messages
    pub fn label(&self) -> &'static str {
        match self {
            FieldTag::Kernel => "内核信息",
            FieldTag::Components => "缺陷归属组件",
            FieldTag::SystemVersion => "缺陷归属的版本",
            FieldTag::Description => "缺陷简述",
            FieldTag::ReferenceUrl => "缺陷详情参考链接",
            FieldTag::GuidanceUrl => "缺陷分析指导链接",
            FieldTag::Influence => "影响性分析说明",
            FieldTag::SeverityLevel => "缺陷严重等级",
            FieldTag::AffectedVersionBlock => "受影响版本排查",
            FieldTag::Abi => "abi变化",
        }
    }

    pub fn trim_policy(&self) -> TrimPolicy {
        match self {
            FieldTag::Description | FieldTag::Influence => TrimPolicy::Raw,
            _ => TrimPolicy::Trimmed,
        }
    }

    /// Position in template order
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for FieldTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How the captured text of a section is cleaned up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrimPolicy {
    /// Strip every space, newline, carriage return and tab, including mid-value
    Trimmed,
    /// Keep the captured text as written
    Raw,
}

impl TrimPolicy {
    pub fn apply(&self, captured: &str) -> String {
        match self {
            TrimPolicy::Trimmed => strip_whitespace(captured),
            TrimPolicy::Raw => captured.to_string(),
        }
    }
}

/// Remove ' ', '\n', '\r' and '\t' anywhere in the string
pub fn strip_whitespace(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ' ' | '\n' | '\r' | '\t'))
        .collect()
}

/// Where a section's capture stops
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminator {
    /// The next label that follows this section in the template
    Label(&'static str),
    /// Whichever of these labels comes first; the first entry is the one the template renders
    FirstOf(&'static [&'static str]),
    EndOfInput,
}

impl Terminator {
    /// Labels that end the section, in template order
    pub fn labels(&self) -> &[&'static str] {
        match self {
            Terminator::Label(label) => std::slice::from_ref(label),
            Terminator::FirstOf(labels) => labels,
            Terminator::EndOfInput => &[],
        }
    }
}

/// One row of the anchor table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldAnchor {
    pub tag: FieldTag,
    /// Literal text between the label and the colon
    pub suffix: &'static str,
    pub terminator: Terminator,
}

impl FieldAnchor {
    /// Full start marker: label plus suffix
    pub fn start_marker(&self) -> String {
        format!("{}{}", self.tag.label(), self.suffix)
    }
}

/// The template's sections in order. Reordering rows is a protocol change.
///
/// Terminators follow the real template, which places a few labels that are not
/// extracted (组件版本, 缺陷创建时间, 二、缺陷分析结构反馈) between sections. Bodies that
/// leave those lines out end the section at the next field label instead.
pub const ANCHORS: [FieldAnchor; FieldTag::COUNT] = [
    FieldAnchor {
        tag: FieldTag::Kernel,
        suffix: "",
        terminator: Terminator::Label("缺陷归属组件"),
    },
    FieldAnchor {
        tag: FieldTag::Components,
        suffix: "",
        terminator: Terminator::FirstOf(&["组件版本", "缺陷归属的版本"]),
    },
    FieldAnchor {
        tag: FieldTag::SystemVersion,
        suffix: "",
        terminator: Terminator::Label("缺陷简述"),
    },
    FieldAnchor {
        tag: FieldTag::Description,
        suffix: "",
        terminator: Terminator::FirstOf(&["缺陷创建时间", "缺陷详情参考链接"]),
    },
    FieldAnchor {
        tag: FieldTag::ReferenceUrl,
        suffix: "",
        terminator: Terminator::Label("缺陷分析指导链接"),
    },
    FieldAnchor {
        tag: FieldTag::GuidanceUrl,
        suffix: "",
        terminator: Terminator::FirstOf(&["二、缺陷分析结构反馈", "影响性分析说明"]),
    },
    FieldAnchor {
        tag: FieldTag::Influence,
        suffix: "",
        terminator: Terminator::Label("缺陷严重等级"),
    },
    FieldAnchor {
        tag: FieldTag::SeverityLevel,
        suffix: "",
        terminator: Terminator::Label("受影响版本排查"),
    },
    FieldAnchor {
        tag: FieldTag::AffectedVersionBlock,
        suffix: BINARY_CHOICE_SUFFIX,
        terminator: Terminator::Label("abi变化"),
    },
    FieldAnchor {
        tag: FieldTag::Abi,
        suffix: BINARY_CHOICE_SUFFIX,
        terminator: Terminator::EndOfInput,
    },
];
