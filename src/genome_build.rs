use std::fmt;

/// One of the fixed reference annotations the bundled tables cover.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GenomeBuild {
    #[default]
    Hg38V43,
    Mm10V25,
}

impl GenomeBuild {
    pub const ALL: [GenomeBuild; 2] = [GenomeBuild::Hg38V43, GenomeBuild::Mm10V25];

    /// Stable identifier used in file names and on the command line.
    pub fn id(&self) -> &'static str {
        match self {
            Self::Hg38V43 => "hg38_v43",
            Self::Mm10V25 => "mm10_v25",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Hg38V43 => "hg38_v43 (human, GENCODE 43)",
            Self::Mm10V25 => "mm10_v25 (mouse, GENCODE M25)",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        match id.to_ascii_lowercase().as_str() {
            "hg38_v43" => Some(Self::Hg38V43),
            "mm10_v25" => Some(Self::Mm10V25),
            _ => None,
        }
    }

    /// Mapping table compiled into the binary.
    pub fn builtin_table(&self) -> &'static str {
        match self {
            Self::Hg38V43 => include_str!("../assets/hg38_v43.tsv"),
            Self::Mm10V25 => include_str!("../assets/mm10_v25.tsv"),
        }
    }

    /// On-disk table that replaces the builtin one when present.
    pub fn runtime_table_path(&self) -> String {
        format!("data/mappings/{}.tsv", self.id())
    }
}

impl fmt::Display for GenomeBuild {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_id_round_trip() {
        for build in GenomeBuild::ALL {
            assert_eq!(GenomeBuild::from_id(build.id()), Some(build));
        }
        assert_eq!(GenomeBuild::from_id("HG38_V43"), Some(GenomeBuild::Hg38V43));
        assert_eq!(GenomeBuild::from_id("hg19"), None);
    }

    #[test]
    fn test_builtin_tables_are_two_column_tsv() {
        for build in GenomeBuild::ALL {
            let text = build.builtin_table();
            assert!(!text.is_empty());
            for line in text.lines().take(5) {
                assert!(line.contains('\t'), "expected a tab in {line:?}");
            }
        }
    }

    #[test]
    fn test_default_build_is_human() {
        assert_eq!(GenomeBuild::default(), GenomeBuild::Hg38V43);
    }
}
