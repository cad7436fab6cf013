//! Manifest, package module and README

use crate::metadata::PackageMetadata;

/// Quote a value as a TOML basic string
pub(crate) fn toml_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04X}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn toml_array(values: &[String]) -> String {
    let items: Vec<String> = values.iter().map(|v| toml_string(v)).collect();
    format!("[{}]", items.join(", "))
}

/// `pyproject.toml` for a setuptools build
pub fn pyproject(meta: &PackageMetadata) -> String {
    let author = if meta.email.is_empty() {
        format!("{{ name = {} }}", toml_string(&meta.author))
    } else {
        format!(
            "{{ name = {}, email = {} }}",
            toml_string(&meta.author),
            toml_string(&meta.email)
        )
    };

    format!(
        "[build-system]\n\
         requires = [\"setuptools>=45\", \"wheel\"]\n\
         build-backend = \"setuptools.build_meta\"\n\
         \n\
         [project]\n\
         name = {name}\n\
         version = {version}\n\
         description = {description}\n\
         authors = [{author}]\n\
         license = {{ text = {license} }}\n\
         requires-python = {requires}\n\
         keywords = {keywords}\n\
         dependencies = {dependencies}\n",
        name = toml_string(&meta.name),
        version = toml_string(&meta.version),
        description = toml_string(&meta.description),
        author = author,
        license = toml_string(meta.license.spdx()),
        requires = toml_string(&meta.python_requires),
        keywords = toml_array(&meta.keywords),
        dependencies = toml_array(&meta.dependencies),
    )
}

/// `<pkg>/__init__.py`
pub fn init_module(meta: &PackageMetadata) -> String {
    format!(
        "\"\"\"Package {}\"\"\"\n\n__version__ = \"{}\"\n",
        meta.name, meta.version
    )
}

pub fn readme(meta: &PackageMetadata) -> String {
    format!(
        "# {name}\n\n\
         {description}\n\n\
         ## Installation\n\n\
         ```bash\n\
         pip install {name}\n\
         ```\n\n\
         ## Usage\n\n\
         ```python\n\
         import {name}\n\
         ```\n\n\
         ## License\n\n\
         {license}\n",
        name = meta.name,
        description = meta.description,
        license = meta.license,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toml_string_escapes() {
        assert_eq!(toml_string("plain"), "\"plain\"");
        assert_eq!(toml_string("say \"hi\""), "\"say \\\"hi\\\"\"");
        assert_eq!(toml_string("a\\b"), "\"a\\\\b\"");
        assert_eq!(toml_string("line\nbreak"), "\"line\\nbreak\"");
    }

    #[test]
    fn test_pyproject_fields() {
        let meta = PackageMetadata {
            name: "fastparse".to_string(),
            email: "ada@example.com".to_string(),
            keywords: vec!["parser".to_string(), "fast".to_string()],
            dependencies: vec!["requests>=2.25.1".to_string()],
            ..PackageMetadata::default()
        };
        let toml = pyproject(&meta);

        assert!(toml.starts_with("[build-system]\n"));
        assert!(toml.contains("build-backend = \"setuptools.build_meta\"\n"));
        assert!(toml.contains("name = \"fastparse\"\n"));
        assert!(toml.contains("version = \"0.1.0\"\n"));
        assert!(toml.contains(
            "authors = [{ name = \"Your Name\", email = \"ada@example.com\" }]\n"
        ));
        assert!(toml.contains("license = { text = \"MIT\" }\n"));
        assert!(toml.contains("requires-python = \">=3.8\"\n"));
        assert!(toml.contains("keywords = [\"parser\", \"fast\"]\n"));
        assert!(toml.contains("dependencies = [\"requests>=2.25.1\"]\n"));
    }

    #[test]
    fn test_pyproject_omits_empty_email() {
        let toml = pyproject(&PackageMetadata::default());
        assert!(toml.contains("authors = [{ name = \"Your Name\" }]\n"));
        assert!(toml.contains("keywords = []\n"));
    }

    #[test]
    fn test_init_module() {
        let init = init_module(&PackageMetadata::default());
        assert_eq!(init, "\"\"\"Package my_package\"\"\"\n\n__version__ = \"0.1.0\"\n");
    }

    #[test]
    fn test_readme_sections() {
        let readme = readme(&PackageMetadata::default());
        assert!(readme.starts_with("# my_package\n\nA short description of your package\n"));
        assert!(readme.contains("pip install my_package\n"));
        assert!(readme.contains("import my_package\n"));
        assert!(readme.ends_with("## License\n\nMIT\n"));
    }
}
