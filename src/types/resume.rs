// src/types/resume.rs
//! Résumé identifiers, parsed résumé data and staged upload files

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{PortalError, Result};
use crate::utils::{file_extension, format_megabytes};

// ===== Identifier =====

/// Backend-assigned résumé key. Always positive; `0` means "no résumé".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct ResumeId(u64);

impl ResumeId {
    pub fn new(raw: u64) -> Option<Self> {
        (raw > 0).then_some(Self(raw))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl TryFrom<u64> for ResumeId {
    type Error = PortalError;

    fn try_from(raw: u64) -> Result<Self> {
        ResumeId::new(raw).ok_or_else(|| PortalError::validation("Resume id must be positive"))
    }
}

impl From<ResumeId> for u64 {
    fn from(id: ResumeId) -> Self {
        id.0
    }
}

impl fmt::Display for ResumeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ResumeId {
    type Err = PortalError;

    fn from_str(s: &str) -> Result<Self> {
        s.trim()
            .parse::<u64>()
            .ok()
            .and_then(ResumeId::new)
            .ok_or_else(|| PortalError::validation(format!("Invalid resume id: {}", s)))
    }
}

// ===== Parsed résumé =====

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedResumeData {
    #[serde(default, deserialize_with = "crate::types::null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "crate::types::null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "crate::types::null_as_default")]
    pub phone: String,
    #[serde(default, deserialize_with = "crate::types::null_as_default")]
    pub skills: Vec<String>,
    #[serde(default, deserialize_with = "crate::types::null_as_default")]
    pub experience: String,
    #[serde(default, deserialize_with = "crate::types::null_as_default")]
    pub education: Vec<String>,
    #[serde(default, deserialize_with = "crate::types::null_as_default")]
    pub projects: Vec<Project>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub name: String,
    #[serde(default, deserialize_with = "crate::types::null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "crate::types::null_as_default")]
    pub technologies: Vec<String>,
}

// ===== Staged upload file =====

/// File formats accepted by the upload form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FileKind {
    PlainText,
    Pdf,
    Docx,
}

impl FileKind {
    pub const ALL: [FileKind; 3] = [FileKind::PlainText, FileKind::Pdf, FileKind::Docx];

    pub fn from_file_name(file_name: &str) -> Option<Self> {
        match file_extension(file_name)?.as_str() {
            "txt" => Some(FileKind::PlainText),
            "pdf" => Some(FileKind::Pdf),
            "docx" => Some(FileKind::Docx),
            _ => None,
        }
    }

    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or(mime).trim();
        Self::ALL.into_iter().find(|kind| kind.mime() == essence)
    }

    pub fn mime(self) -> &'static str {
        match self {
            FileKind::PlainText => "text/plain",
            FileKind::Pdf => "application/pdf",
            FileKind::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            FileKind::PlainText => "txt",
            FileKind::Pdf => "pdf",
            FileKind::Docx => "docx",
        }
    }

    /// Value for an `accept` attribute on a file input
    pub fn accept_list() -> String {
        Self::ALL
            .iter()
            .map(|kind| format!(".{},{}", kind.extension(), kind.mime()))
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// A résumé file chosen by the user but not yet sent to the backend
#[derive(Clone, PartialEq)]
pub struct StagedFile {
    file_name: String,
    kind: FileKind,
    data: Vec<u8>,
}

impl StagedFile {
    /// Validate a selected file against the format allow-list and size limit.
    ///
    /// The extension decides the format; a declared MIME type is only used
    /// when the name carries no extension at all.
    pub fn new(
        file_name: &str,
        declared_mime: Option<&str>,
        data: Vec<u8>,
        max_bytes: u64,
    ) -> Result<Self> {
        let file_name = file_name.trim();
        if file_name.is_empty() {
            return Err(PortalError::validation("파일을 선택해주세요"));
        }

        let has_extension = file_extension(file_name).is_some();
        let kind = if has_extension {
            FileKind::from_file_name(file_name)
        } else {
            declared_mime.and_then(FileKind::from_mime)
        }
        .ok_or_else(|| {
            PortalError::validation(format!(
                "지원하지 않는 파일 형식입니다: {} (TXT, PDF, DOCX만 가능)",
                file_name
            ))
        })?;

        if data.is_empty() {
            return Err(PortalError::validation("빈 파일은 업로드할 수 없습니다"));
        }

        if data.len() as u64 > max_bytes {
            return Err(PortalError::validation(format!(
                "파일 크기가 제한({})을 초과했습니다",
                format_megabytes(max_bytes)
            )));
        }

        let file_name = if has_extension {
            file_name.to_string()
        } else {
            format!("{}.{}", file_name, kind.extension())
        };

        Ok(Self {
            file_name,
            kind,
            data,
        })
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn kind(&self) -> FileKind {
        self.kind
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }
}

impl fmt::Debug for StagedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StagedFile")
            .field("file_name", &self.file_name)
            .field("kind", &self.kind)
            .field("size", &self.data.len())
            .finish()
    }
}
