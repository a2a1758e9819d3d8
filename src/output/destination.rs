use std::path::{
    Path,
    PathBuf,
};

use crate::types::Locale;

/// How rendered templates are laid out under a mapping's `dest`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationLayout {
    pub root: PathBuf,
    /// Drop the template's subdirectories and keep only its file name.
    pub flatten: bool,
    /// Write the primary locale directly under `root`.
    pub omit_primary_slug: bool,
}

impl DestinationLayout {
    #[must_use]
    pub const fn new(root: PathBuf, flatten: bool, omit_primary_slug: bool) -> Self {
        Self { root, flatten, omit_primary_slug }
    }

    /// `root / [locale id] / relative`
    ///
    /// # Examples
    /// ```
    /// use std::path::{Path, PathBuf};
    ///
    /// use locale_html::output::DestinationLayout;
    /// use locale_html::types::Locale;
    ///
    /// let layout = DestinationLayout::new(PathBuf::from("dist"), false, false);
    /// let path = layout.path_for(Path::new("blog/post.html"), &Locale::new("es"), false);
    /// assert_eq!(path, PathBuf::from("dist/es/blog/post.html"));
    /// ```
    #[must_use]
    pub fn path_for(&self, relative: &Path, locale: &Locale, is_primary: bool) -> PathBuf {
        let mut path = self.root.clone();
        if !(is_primary && self.omit_primary_slug) {
            path.push(&locale.id);
        }

        match relative.file_name() {
            Some(file_name) if self.flatten => path.push(file_name),
            _ => path.push(relative),
        }
        path
    }
}
