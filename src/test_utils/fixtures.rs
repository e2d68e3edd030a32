use std::path::PathBuf;

use tempfile::TempDir;

/// Isolated directory holding a bandit state file and content files.
pub struct StateFixture {
    pub temp_dir: TempDir,
    pub state_path: PathBuf,
}

impl Default for StateFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl StateFixture {
    #[must_use]
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let state_path = temp_dir.path().join("state").join("agent_state.json");

        println!("[FIXTURE] Created temp directory: {:?}", temp_dir.path());

        Self {
            temp_dir,
            state_path,
        }
    }

    /// Write a content file under the fixture directory.
    #[must_use]
    pub fn create_file(&self, relative_path: &str, content: &str) -> PathBuf {
        let full_path = self.temp_dir.path().join(relative_path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        std::fs::write(&full_path, content).expect("Failed to write file");
        println!(
            "[FIXTURE] Created file: {:?} ({} bytes)",
            full_path,
            content.len()
        );
        full_path
    }
}

/// A markdown article in the shape the generator produces.
#[must_use]
pub fn sample_article(primary_keyword: &str) -> String {
    let paragraph = format!(
        "El {primary_keyword} ayuda a los equipos a crecer con contenido útil y medible. "
    )
    .repeat(8);
    format!(
        "# Guía de {primary_keyword}\n\n\
         Entender **{primary_keyword}** es clave hoy. {paragraph}\n\n\
         ## Beneficios\n\n{paragraph}\n\n\
         ## Primeros pasos\n\n{paragraph}\n\n\
         En conclusión, descubre cómo aplicarlo y comienza hoy mismo."
    )
}
