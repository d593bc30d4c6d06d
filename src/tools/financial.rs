//! Financial health check: savings and savings ratio, with optional AI
//! elaboration of the computed result.

use crate::tools::{parse_amount, ToolPhase};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinancialReport {
    pub savings: f64,
    pub ratio: f64,
}

#[derive(Debug, Default)]
pub struct FinancialTool {
    pub income: String,
    pub expense: String,
    pub report: Option<FinancialReport>,
    pub advice: Option<String>,
    pub busy: bool,
    generation: u64,
}

impl FinancialTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> ToolPhase {
        if self.busy {
            ToolPhase::Augmenting
        } else if self.advice.is_some() {
            ToolPhase::Augmented
        } else if self.report.is_some() {
            ToolPhase::Calculated
        } else {
            ToolPhase::Idle
        }
    }

    /// Explicit calculate action. Always produces a report; unparseable
    /// input counts as zero. Prior advice is discarded.
    pub fn calculate(&mut self) {
        let income = parse_amount(&self.income);
        let expense = parse_amount(&self.expense);
        let savings = income - expense;
        let ratio = if income > 0.0 {
            savings / income * 100.0
        } else {
            0.0
        };
        self.report = Some(FinancialReport { savings, ratio });
        self.advice = None;
        self.generation += 1;
    }

    pub fn can_request_advice(&self) -> bool {
        self.report.is_some() && !self.busy
    }

    /// Start the augmentation round-trip: marks the widget busy and hands
    /// back the generation tag plus the prompt to send. `None` without a
    /// prior calculation or while a request is outstanding.
    pub fn begin_augmenting(&mut self) -> Option<(u64, String)> {
        if !self.can_request_advice() {
            return None;
        }
        let report = self.report.as_ref()?;
        let prompt = format!(
            "Saya memiliki pemasukan Rp{} dan pengeluaran Rp{}. Sisa uang Rp{} \
             (Ratio tabungan {:.1}%). Berikan 3 tips singkat, praktis, dan ramah \
             untuk mengoptimalkan keuangan saya agar lebih sehat. Gunakan format \
             poin. WAJIB Jawab menggunakan Bahasa Indonesia. JANGAN gunakan \
             format tabel atau heading markdown (#). Cukup bullet points biasa.",
            self.income, self.expense, report.savings, report.ratio,
        );
        self.busy = true;
        Some((self.generation, prompt))
    }

    /// Apply a completed advice response. A response tagged with an older
    /// generation than the latest calculate is discarded.
    pub fn finish_augmenting(&mut self, generation: u64, text: String) {
        self.busy = false;
        if generation == self.generation {
            self.advice = Some(text);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn savings_and_ratio_follow_the_formula() {
        let mut tool = FinancialTool::new();
        tool.income = "5000000".to_string();
        tool.expense = "3000000".to_string();
        tool.calculate();
        let report = tool.report.unwrap();
        assert_eq!(report.savings, 2_000_000.0);
        assert_eq!(report.ratio, 40.0);
    }

    #[test]
    fn zero_income_yields_zero_ratio() {
        let mut tool = FinancialTool::new();
        tool.income = "0".to_string();
        tool.expense = "250000".to_string();
        tool.calculate();
        let report = tool.report.unwrap();
        assert_eq!(report.savings, -250_000.0);
        assert_eq!(report.ratio, 0.0);
    }

    #[test]
    fn advice_requires_a_calculation_first() {
        let mut tool = FinancialTool::new();
        assert!(tool.begin_augmenting().is_none());
        assert_eq!(tool.phase(), ToolPhase::Idle);

        tool.income = "5000000".to_string();
        tool.expense = "3000000".to_string();
        tool.calculate();
        assert_eq!(tool.phase(), ToolPhase::Calculated);

        let (generation, prompt) = tool.begin_augmenting().unwrap();
        assert_eq!(tool.phase(), ToolPhase::Augmenting);
        assert!(prompt.contains("Rp5000000"));
        assert!(prompt.contains("40.0%"));

        // Busy flag blocks re-entrant triggering.
        assert!(tool.begin_augmenting().is_none());

        tool.finish_augmenting(generation, "* Tips pertama".to_string());
        assert_eq!(tool.phase(), ToolPhase::Augmented);
        assert_eq!(tool.advice.as_deref(), Some("* Tips pertama"));
    }

    #[test]
    fn stale_response_is_discarded_after_recalculation() {
        let mut tool = FinancialTool::new();
        tool.income = "4000000".to_string();
        tool.expense = "1000000".to_string();
        tool.calculate();
        let (stale_generation, _) = tool.begin_augmenting().unwrap();

        // User recalculates while the request is in flight.
        tool.expense = "2000000".to_string();
        tool.calculate();
        tool.finish_augmenting(stale_generation, "saran basi".to_string());

        assert!(tool.advice.is_none());
        assert_eq!(tool.phase(), ToolPhase::Calculated);
    }

    #[test]
    fn recalculation_discards_prior_advice() {
        let mut tool = FinancialTool::new();
        tool.income = "4000000".to_string();
        tool.calculate();
        let (generation, _) = tool.begin_augmenting().unwrap();
        tool.finish_augmenting(generation, "saran lama".to_string());
        assert!(tool.advice.is_some());

        tool.calculate();
        assert!(tool.advice.is_none());
    }
}
