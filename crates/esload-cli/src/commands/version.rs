use miette::Result;
use serde::Serialize;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Serialize)]
struct VersionOutput {
    name: &'static str,
    version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    git_hash: Option<&'static str>,
}

impl VersionOutput {
    fn current() -> Self {
        Self {
            name: "esload",
            version: VERSION,
            git_hash: option_env!("ESLOAD_BUILD_GIT_HASH"),
        }
    }
}

impl std::fmt::Display for VersionOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.name, self.version)?;
        if let Some(hash) = self.git_hash {
            write!(f, " ({hash})")?;
        }
        Ok(())
    }
}

pub fn run(json: bool) -> Result<()> {
    let output = VersionOutput::current();
    if json {
        return super::print_json(&output);
    }
    println!("{output}");
    Ok(())
}
