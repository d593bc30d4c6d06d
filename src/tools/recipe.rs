//! Recipe suggestions from leftover ingredients. Pure augmentation: there
//! is no local computation, only the generate action, which is a no-op
//! while the ingredient list is empty.

use crate::tools::ToolPhase;

#[derive(Debug, Default)]
pub struct RecipeTool {
    pub ingredients: String,
    pub recipe: Option<String>,
    pub busy: bool,
    generation: u64,
}

impl RecipeTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> ToolPhase {
        if self.busy {
            ToolPhase::Augmenting
        } else if self.recipe.is_some() {
            ToolPhase::Augmented
        } else {
            ToolPhase::Idle
        }
    }

    pub fn can_generate(&self) -> bool {
        !self.ingredients.trim().is_empty() && !self.busy
    }

    pub fn begin_augmenting(&mut self) -> Option<(u64, String)> {
        if !self.can_generate() {
            return None;
        }
        let prompt = format!(
            "Saya punya bahan-bahan ini di kulkas: {}. Tolong buatkan SATU ide \
             resep masakan Indonesia yang lezat, hemat, dan mudah dibuat \
             menggunakan bahan tersebut. Sertakan nama masakan dan cara masak \
             singkat. Jawab dalam Bahasa Indonesia. JANGAN gunakan format tabel \
             atau heading markdown (#).",
            self.ingredients.trim(),
        );
        self.generation += 1;
        self.busy = true;
        Some((self.generation, prompt))
    }

    pub fn finish_augmenting(&mut self, generation: u64, text: String) {
        self.busy = false;
        if generation == self.generation {
            self.recipe = Some(text);
        }
    }
}
