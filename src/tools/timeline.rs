//! Savings timeline and trip planner: months needed to reach a target,
//! with an AI-generated day-by-day itinerary building on the result.

use crate::tools::{parse_amount, ToolPhase};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TripKind {
    Umrah,
    Liburan,
}

impl TripKind {
    pub fn label(self) -> &'static str {
        match self {
            TripKind::Umrah => "Umrah",
            TripKind::Liburan => "Liburan",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            TripKind::Umrah => TripKind::Liburan,
            TripKind::Liburan => TripKind::Umrah,
        }
    }
}

#[derive(Debug)]
pub struct TimelineTool {
    pub target: String,
    pub saving: String,
    pub months: Option<u64>,
    pub trip: TripKind,
    pub destination: String,
    pub duration: String,
    pub itinerary: Option<String>,
    pub busy: bool,
    generation: u64,
}

impl Default for TimelineTool {
    fn default() -> Self {
        TimelineTool {
            target: "30000000".to_string(),
            saving: String::new(),
            months: None,
            trip: TripKind::Umrah,
            destination: String::new(),
            duration: "9".to_string(),
            itinerary: None,
            busy: false,
            generation: 0,
        }
    }
}

impl TimelineTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> ToolPhase {
        if self.busy {
            ToolPhase::Augmenting
        } else if self.itinerary.is_some() {
            ToolPhase::Augmented
        } else if self.months.is_some() {
            ToolPhase::Calculated
        } else {
            ToolPhase::Idle
        }
    }

    /// Explicit calculate action: `ceil(target / saving)`, defined only for
    /// a positive monthly saving. Otherwise the action is a no-op rather
    /// than a division fault.
    pub fn calculate(&mut self) {
        let target = parse_amount(&self.target);
        let saving = parse_amount(&self.saving);
        if saving > 0.0 {
            self.months = Some((target / saving).ceil() as u64);
            self.itinerary = None;
            self.generation += 1;
        }
    }

    pub fn can_request_itinerary(&self) -> bool {
        self.months.is_some() && !self.busy
    }

    fn destination_text(&self) -> String {
        match self.trip {
            TripKind::Umrah => "Umrah (Mekkah & Madinah)".to_string(),
            TripKind::Liburan => {
                if self.destination.trim().is_empty() {
                    "Destinasi Liburan Populer (Jepang/Korea)".to_string()
                } else {
                    self.destination.clone()
                }
            }
        }
    }

    pub fn begin_augmenting(&mut self) -> Option<(u64, String)> {
        if !self.can_request_itinerary() {
            return None;
        }
        let months = self.months?;
        let prompt = format!(
            "Buatkan rencana perjalanan (itinerary) untuk {} selama {} hari. \
             Berikan poin-poin kegiatan utama per hari secara ringkas dan padat. \
             Fokus pada tempat wajib dikunjungi. Sebagai konteks, dana perjalanan \
             saya terkumpul dalam {} bulan dengan tabungan Rp{} per bulan. \
             Gunakan Bahasa Indonesia sepenuhnya. Format list hari demi hari. \
             JANGAN gunakan format tabel atau heading markdown (#).",
            self.destination_text(),
            self.duration,
            months,
            self.saving,
        );
        self.busy = true;
        Some((self.generation, prompt))
    }

    pub fn finish_augmenting(&mut self, generation: u64, text: String) {
        self.busy = false;
        if generation == self.generation {
            self.itinerary = Some(text);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn months_is_ceiling_of_exact_division() {
        let mut tool = TimelineTool::new();
        tool.saving = "1000000".to_string();
        tool.calculate();
        assert_eq!(tool.months, Some(30));
    }

    #[test]
    fn inexact_division_rounds_up() {
        let mut tool = TimelineTool::new();
        tool.target = "10000000".to_string();
        tool.saving = "3000000".to_string();
        tool.calculate();
        assert_eq!(tool.months, Some(4));
    }

    #[test]
    fn zero_saving_produces_no_result() {
        let mut tool = TimelineTool::new();
        tool.saving = "0".to_string();
        tool.calculate();
        assert_eq!(tool.months, None);
        assert_eq!(tool.phase(), ToolPhase::Idle);

        tool.saving = "belum tahu".to_string();
        tool.calculate();
        assert_eq!(tool.months, None);
    }

    #[test]
    fn itinerary_requires_a_computed_timeline() {
        let mut tool = TimelineTool::new();
        assert!(tool.begin_augmenting().is_none());

        tool.saving = "1000000".to_string();
        tool.calculate();
        let (_, prompt) = tool.begin_augmenting().unwrap();
        assert!(prompt.contains("Umrah (Mekkah & Madinah)"));
        assert!(prompt.contains("selama 9 hari"));
        assert!(prompt.contains("dalam 30 bulan"));
    }

    #[test]
    fn empty_holiday_destination_uses_popular_fallback() {
        let mut tool = TimelineTool::new();
        tool.trip = TripKind::Liburan;
        tool.saving = "1000000".to_string();
        tool.calculate();
        let (_, prompt) = tool.begin_augmenting().unwrap();
        assert!(prompt.contains("Destinasi Liburan Populer (Jepang/Korea)"));

        tool.finish_augmenting(tool.generation, "Hari 1: tiba".to_string());
        tool.destination = "Turki".to_string();
        tool.calculate();
        let (_, prompt) = tool.begin_augmenting().unwrap();
        assert!(prompt.contains("untuk Turki selama"));
    }
}
