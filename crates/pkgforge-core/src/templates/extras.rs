//! Optional test scaffolding and documentation pages

use crate::metadata::PackageMetadata;

pub const PYTEST_INI: &str = "[pytest]\npython_files = test_*.py\n";

/// `tests/test_main.py` checking the package version
pub fn test_main(meta: &PackageMetadata) -> String {
    format!(
        "import pytest\n\
         from {} import __version__\n\
         \n\
         \n\
         def test_version():\n\
         \x20   assert __version__ == \"{}\"\n",
        meta.name, meta.version
    )
}

/// Static `docs/index.md` used when AI docs are off or unavailable
pub fn basic_docs(meta: &PackageMetadata) -> String {
    format!(
        "# {name} Documentation\n\n\
         ## Installation\n\n\
         ```bash\n\
         pip install {name}\n\
         ```\n\n\
         ## Usage\n\n\
         ```python\n\
         import {name}\n\
         ```\n",
        name = meta.name
    )
}
