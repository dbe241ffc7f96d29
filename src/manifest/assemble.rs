// src/manifest/assemble.rs

//! Module assembly

use super::listing::PackageEntry;
use super::model::{ModuleRecord, SourceRecord};
use crate::classify::BuildSystemDecision;
use crate::recipe::Recipe;

/// Combine classification results for one package into a module
///
/// Sources come first, then patches, each group in the order given. Native
/// modules get an empty `config-opts`; fallback modules get the recipe's
/// `%build` lines as `build-commands` and no `config-opts`.
pub fn assemble(
    entry: &PackageEntry,
    recipe: &Recipe,
    decision: &BuildSystemDecision,
    sources: Vec<SourceRecord>,
    patches: Vec<SourceRecord>,
) -> ModuleRecord {
    let (config_opts, build_commands) = match decision {
        BuildSystemDecision::Native(_) => (Some(Vec::new()), None),
        BuildSystemDecision::Fallback { .. } => (None, Some(recipe.build_commands())),
    };

    let mut all_sources = sources;
    all_sources.extend(patches);

    ModuleRecord {
        name: entry.name.clone(),
        buildsystem: decision.buildsystem().to_string(),
        config_opts,
        build_commands,
        sources: all_sources,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{classify_build_system, NativeBuildSystem};
    use crate::manifest::SourceKind;
    use crate::recipe::parse_spec;

    fn entry(name: &str) -> PackageEntry {
        PackageEntry {
            name: name.to_string(),
            revision: "main".to_string(),
            is_private: false,
        }
    }

    #[test]
    fn test_native_module() {
        let recipe = parse_spec("Name: foo\n%build\n%meson\n%meson_build\n").unwrap();
        let decision = BuildSystemDecision::Native(NativeBuildSystem::Meson);
        let module = assemble(&entry("foo"), &recipe, &decision, vec![], vec![]);

        assert_eq!(module.buildsystem, "meson");
        assert_eq!(module.config_opts, Some(vec![]));
        assert!(module.build_commands.is_none());
    }

    #[test]
    fn test_fallback_module_keeps_build_lines() {
        let recipe = parse_spec("Name: foo\n%build\n%set_build_flags\nmake %{?_smp_mflags}\n")
            .unwrap();
        let decision = classify_build_system(recipe.build_tool());
        let module = assemble(&entry("foo"), &recipe, &decision, vec![], vec![]);

        assert_eq!(module.buildsystem, "simple");
        assert!(module.config_opts.is_none());
        assert_eq!(
            module.build_commands,
            Some(vec!["%set_build_flags".to_string(), "make %{?_smp_mflags}".to_string()])
        );
    }

    #[test]
    fn test_patches_follow_sources() {
        let recipe = parse_spec("Name: foo\n").unwrap();
        let decision = classify_build_system(None);
        let module = assemble(
            &entry("foo"),
            &recipe,
            &decision,
            vec![
                SourceRecord::remote(SourceKind::Archive, "https://e.org/a.tar.gz", None),
                SourceRecord::local_file("b.desktop", None),
            ],
            vec![SourceRecord::patch("p0.patch"), SourceRecord::patch("p1.patch")],
        );

        let kinds: Vec<_> = module.sources.iter().map(|s| s.kind()).collect();
        assert_eq!(
            kinds,
            vec![SourceKind::Archive, SourceKind::File, SourceKind::Patch, SourceKind::Patch]
        );
        assert_eq!(module.sources[3].path(), Some("p1.patch"));
        assert_eq!(module.build_commands, Some(vec![]));
    }
}
