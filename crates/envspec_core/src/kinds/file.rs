//! Variables holding a path to a file.

use std::path::PathBuf;

use crate::error::ValueError;
use crate::kind::Kind;
use crate::schema::Schema;

/// A file path, optionally required to name an existing regular file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct File {
    pub(crate) must_exist: bool,
}

impl File {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Kind for File {
    type Value = PathBuf;

    fn schema(&self) -> Schema {
        Schema::of_type("file path")
    }

    fn parse(&self, raw: &str) -> Result<PathBuf, ValueError> {
        Ok(PathBuf::from(raw))
    }

    fn validate(&self, value: &PathBuf) -> Result<(), ValueError> {
        if value.as_os_str().is_empty() {
            return Err(ValueError::Empty);
        }

        if self.must_exist && !value.is_file() {
            return Err(ValueError::NoSuchFile);
        }

        Ok(())
    }

    fn render(&self, value: &PathBuf) -> String {
        format!("{:?}", value.display().to_string())
    }

    fn render_raw(&self, raw: &str) -> String {
        format!("{:?}", raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_must_exist() {
        let temp = tempdir().unwrap();
        let present = temp.path().join("id_rsa");
        fs::write(&present, "key").unwrap();

        let kind = File { must_exist: true };
        assert_eq!(kind.validate(&present), Ok(()));
        assert_eq!(
            kind.validate(&temp.path().join("missing")),
            Err(ValueError::NoSuchFile)
        );
        assert_eq!(kind.validate(&temp.path().to_path_buf()), Err(ValueError::NoSuchFile));
    }

    #[test]
    fn test_render_quotes_path() {
        let kind = File::new();
        assert_eq!(kind.render(&PathBuf::from("/etc/ssh/id_rsa")), r#""/etc/ssh/id_rsa""#);
    }
}
