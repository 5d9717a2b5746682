use std::io;
use std::path::PathBuf;

#[derive(Debug)]
pub enum SummaryError {
    Io {
        path: PathBuf,
        source: io::Error,
    },
    XmlParse(quick_xml::Error),
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },
    InvalidAttribute {
        element: &'static str,
        attribute: &'static str,
        value: String,
    },
    MissingElement {
        element: &'static str,
        child: &'static str,
    },
    InvalidElement {
        element: &'static str,
        value: String,
    },
}

impl std::fmt::Display for SummaryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Cannot read '{}': {source}", path.display())
            }
            Self::XmlParse(e) => write!(f, "XML parse error: {e}"),
            Self::MissingAttribute { element, attribute } => {
                write!(f, "Missing attribute '{attribute}' on <{element}>")
            }
            Self::InvalidAttribute {
                element,
                attribute,
                value,
            } => write!(
                f,
                "Invalid value '{value}' for attribute '{attribute}' on <{element}>"
            ),
            Self::MissingElement { element, child } => {
                write!(f, "Missing child <{child}> in <{element}>")
            }
            Self::InvalidElement { element, value } => {
                write!(f, "Invalid value '{value}' in <{element}>")
            }
        }
    }
}

impl std::error::Error for SummaryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::XmlParse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<quick_xml::Error> for SummaryError {
    fn from(e: quick_xml::Error) -> Self {
        Self::XmlParse(e)
    }
}
