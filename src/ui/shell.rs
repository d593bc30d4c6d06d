//! Interactive shell: views, keyboard handling, and the draw loop.
//!
//! The shell is event-driven: key presses and completed background work
//! mark it dirty, and the next tick redraws. Advice requests run on
//! spawned tasks and report back over an unbounded channel tagged with
//! the widget and the generation the request was issued under.

use crate::core::advice::AdviceClient;
use crate::core::catalog::Catalog;
use crate::core::checkout::{format_rupiah, Order};
use crate::tools::financial::FinancialTool;
use crate::tools::recipe::RecipeTool;
use crate::tools::timeline::TimelineTool;
use crate::tools::ToolId;
use crate::ui::blocks::format_blocks;
use crate::ui::render::render_blocks;
use crate::ui::theme::Theme;
use ratatui::backend::Backend;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::{Frame, Terminal};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Home,
    Tools,
    Products,
    Testimonials,
}

#[derive(Debug)]
pub enum ShellEvent {
    CatalogLoaded(Catalog),
    AdviceReady {
        tool: ToolId,
        generation: u64,
        text: String,
    },
}

#[derive(Debug)]
struct CheckoutForm {
    product_index: usize,
    name: String,
    email: String,
    editing_email: bool,
    link: Option<String>,
}

pub struct Shell {
    view: View,
    catalog: Option<Catalog>,
    financial: FinancialTool,
    timeline: TimelineTool,
    recipe: RecipeTool,
    advice: Arc<AdviceClient>,
    whatsapp_phone: String,
    data_dir: PathBuf,
    theme: Theme,
    focus: ToolId,
    field: usize,
    selected_product: usize,
    checkout: Option<CheckoutForm>,
    dirty: bool,
    tx: mpsc::UnboundedSender<ShellEvent>,
    rx: mpsc::UnboundedReceiver<ShellEvent>,
}

impl Shell {
    pub fn new(advice: AdviceClient, whatsapp_phone: String, data_dir: PathBuf) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Shell {
            view: View::Home,
            catalog: None,
            financial: FinancialTool::new(),
            timeline: TimelineTool::new(),
            recipe: RecipeTool::new(),
            advice: Arc::new(advice),
            whatsapp_phone,
            data_dir,
            theme: Theme::dark_default(),
            focus: ToolId::Financial,
            field: 0,
            selected_product: 0,
            checkout: None,
            dirty: true,
            tx,
            rx,
        }
    }

    /// Kick off the one-shot catalog load; the result arrives as a
    /// [`ShellEvent::CatalogLoaded`] and unblocks the loading screen.
    fn spawn_catalog_load(&self) {
        let tx = self.tx.clone();
        let data_dir = self.data_dir.clone();
        tokio::spawn(async move {
            let catalog = Catalog::load(&data_dir).await;
            let _ = tx.send(ShellEvent::CatalogLoaded(catalog));
        });
    }

    pub fn apply(&mut self, event: ShellEvent) {
        self.dirty = true;
        match event {
            ShellEvent::CatalogLoaded(catalog) => self.catalog = Some(catalog),
            ShellEvent::AdviceReady {
                tool,
                generation,
                text,
            } => match tool {
                ToolId::Financial => self.financial.finish_augmenting(generation, text),
                ToolId::Timeline => self.timeline.finish_augmenting(generation, text),
                ToolId::Recipe => self.recipe.finish_augmenting(generation, text),
            },
        }
    }

    /// Handle one key press. Returns false when the app should quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return true;
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return false;
        }
        self.dirty = true;

        if self.checkout.is_some() {
            self.handle_checkout_key(key);
            return true;
        }

        match key.code {
            KeyCode::F(1) => self.view = View::Home,
            KeyCode::F(2) => self.view = View::Tools,
            KeyCode::F(3) => self.view = View::Products,
            KeyCode::F(4) => self.view = View::Testimonials,
            _ => match self.view {
                View::Tools => self.handle_tools_key(key),
                View::Products => self.handle_products_key(key),
                View::Home | View::Testimonials => {}
            },
        }
        true
    }

    fn handle_tools_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('g') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.request_advice(self.focus);
            return;
        }
        match key.code {
            KeyCode::Tab => {
                self.focus = match self.focus {
                    ToolId::Financial => ToolId::Timeline,
                    ToolId::Timeline => ToolId::Recipe,
                    ToolId::Recipe => ToolId::Financial,
                };
                self.field = 0;
            }
            KeyCode::Up => {
                self.field = self.field.checked_sub(1).unwrap_or(self.field_count() - 1);
            }
            KeyCode::Down => {
                self.field = (self.field + 1) % self.field_count();
            }
            KeyCode::Left | KeyCode::Right => {
                if self.focus == ToolId::Timeline && self.field == 0 {
                    self.timeline.trip = self.timeline.trip.toggled();
                }
            }
            KeyCode::Enter => match self.focus {
                ToolId::Financial => self.financial.calculate(),
                ToolId::Timeline => self.timeline.calculate(),
                // Pure augmentation widget: enter is the generate action.
                ToolId::Recipe => self.request_advice(ToolId::Recipe),
            },
            KeyCode::Backspace => {
                if let Some(field) = self.focused_field_mut() {
                    field.pop();
                }
            }
            KeyCode::Char(ch) if key.modifiers.intersection(KeyModifiers::CONTROL).is_empty() => {
                if let Some(field) = self.focused_field_mut() {
                    field.push(ch);
                }
            }
            _ => {}
        }
    }

    fn field_count(&self) -> usize {
        match self.focus {
            ToolId::Financial => 2,
            ToolId::Timeline => 5,
            ToolId::Recipe => 1,
        }
    }

    fn focused_field_mut(&mut self) -> Option<&mut String> {
        match (self.focus, self.field) {
            (ToolId::Financial, 0) => Some(&mut self.financial.income),
            (ToolId::Financial, 1) => Some(&mut self.financial.expense),
            // Timeline field 0 is the trip-kind toggle, not free text.
            (ToolId::Timeline, 1) => Some(&mut self.timeline.duration),
            (ToolId::Timeline, 2) => Some(&mut self.timeline.destination),
            (ToolId::Timeline, 3) => Some(&mut self.timeline.target),
            (ToolId::Timeline, 4) => Some(&mut self.timeline.saving),
            (ToolId::Recipe, 0) => Some(&mut self.recipe.ingredients),
            _ => None,
        }
    }

    fn handle_products_key(&mut self, key: KeyEvent) {
        let Some(catalog) = &self.catalog else {
            return;
        };
        let count = catalog.products.len();
        if count == 0 {
            return;
        }
        match key.code {
            KeyCode::Up => {
                self.selected_product = self.selected_product.checked_sub(1).unwrap_or(count - 1);
            }
            KeyCode::Down => {
                self.selected_product = (self.selected_product + 1) % count;
            }
            KeyCode::Enter => {
                self.checkout = Some(CheckoutForm {
                    product_index: self.selected_product,
                    name: String::new(),
                    email: String::new(),
                    editing_email: false,
                    link: None,
                });
            }
            _ => {}
        }
    }

    fn handle_checkout_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.checkout = None;
            }
            KeyCode::Tab | KeyCode::Up | KeyCode::Down => {
                if let Some(form) = &mut self.checkout {
                    form.editing_email = !form.editing_email;
                }
            }
            KeyCode::Enter => self.confirm_checkout(),
            KeyCode::Backspace => {
                if let Some(form) = &mut self.checkout {
                    if form.editing_email {
                        form.email.pop();
                    } else {
                        form.name.pop();
                    }
                }
            }
            KeyCode::Char(ch) if key.modifiers.intersection(KeyModifiers::CONTROL).is_empty() => {
                if let Some(form) = &mut self.checkout {
                    if form.editing_email {
                        form.email.push(ch);
                    } else {
                        form.name.push(ch);
                    }
                }
            }
            _ => {}
        }
    }

    /// Build the deep link once both buyer fields are filled; no-op
    /// otherwise, matching the disabled confirm button.
    fn confirm_checkout(&mut self) {
        let Some(catalog) = &self.catalog else {
            return;
        };
        let Some(form) = &mut self.checkout else {
            return;
        };
        let Some(product) = catalog.products.get(form.product_index) else {
            return;
        };
        let order = Order {
            product,
            buyer_name: &form.name,
            buyer_email: &form.email,
        };
        if !order.is_complete() {
            return;
        }
        form.link = Some(order.deep_link(&self.whatsapp_phone));
    }

    fn request_advice(&mut self, tool: ToolId) {
        let started = match tool {
            ToolId::Financial => self.financial.begin_augmenting(),
            ToolId::Timeline => self.timeline.begin_augmenting(),
            ToolId::Recipe => self.recipe.begin_augmenting(),
        };
        let Some((generation, prompt)) = started else {
            return;
        };
        let client = Arc::clone(&self.advice);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let text = client.request(&prompt).await;
            let _ = tx.send(ShellEvent::AdviceReady {
                tool,
                generation,
                text,
            });
        });
    }

    // --- drawing ---

    pub fn draw(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(f.area());

        self.draw_nav(f, chunks[0]);

        let Some(catalog) = &self.catalog else {
            let loading = Paragraph::new("Memuat data...").style(self.theme.muted_style);
            f.render_widget(loading, chunks[1]);
            return;
        };

        match self.view {
            View::Home => self.draw_home(f, chunks[1], catalog),
            View::Tools => self.draw_tools(f, chunks[1]),
            View::Products => self.draw_products(f, chunks[1], catalog),
            View::Testimonials => self.draw_testimonials(f, chunks[1], catalog),
        }

        self.draw_footer(f, chunks[2]);

        if self.checkout.is_some() {
            self.draw_checkout(f, catalog);
        }
    }

    fn draw_nav(&self, f: &mut Frame, area: Rect) {
        let item = |label: &str, view: View| {
            let style = if self.view == view {
                self.theme.nav_active_style
            } else {
                self.theme.nav_style
            };
            Span::styled(label.to_string(), style)
        };
        let line = Line::from(vec![
            Span::styled("⌂ HomeyTips ", self.theme.title_style),
            Span::styled("AI Powered", self.theme.accent_style),
            Span::raw("   "),
            item("F1 Beranda", View::Home),
            Span::raw("  "),
            item("F2 Smart Tools", View::Tools),
            Span::raw("  "),
            item("F3 Produk", View::Products),
            Span::raw("  "),
            item("F4 Testimoni", View::Testimonials),
        ]);
        f.render_widget(Paragraph::new(line), area);
    }

    fn draw_footer(&self, f: &mut Frame, area: Rect) {
        let hint = match self.view {
            View::Tools => {
                "Tab: ganti widget · ↑/↓: pilih isian · Enter: hitung · Ctrl+G: minta AI · Ctrl+C: keluar"
            }
            View::Products => "↑/↓: pilih template · Enter: beli · Ctrl+C: keluar",
            _ => "F1-F4: navigasi · Ctrl+C: keluar",
        };
        f.render_widget(
            Paragraph::new(hint).style(self.theme.muted_style),
            area,
        );
    }

    fn draw_home(&self, f: &mut Frame, area: Rect, catalog: &Catalog) {
        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Perencanaan Hidup Lebih Cerdas",
                self.theme.title_style,
            )),
            Line::from(Span::styled(
                "Gunakan kekuatan AI untuk mengatur keuangan, merencanakan perjalanan, \
                 hingga menentukan menu masakan harian Anda.",
                self.theme.text_style,
            )),
            Line::from(""),
            Line::from(Span::styled("✨ AI Smart Tools (F2)", self.theme.nav_active_style)),
            Line::from(Span::styled(
                "Bukan sekadar kalkulator biasa. Ditenagai AI untuk saran yang lebih personal.",
                self.theme.label_style,
            )),
            Line::from(""),
            Line::from(Span::styled("Template Premium (F3)", self.theme.nav_active_style)),
        ];
        for product in catalog.products.iter().take(3) {
            lines.push(Line::from(vec![
                Span::styled("  • ", self.theme.bullet_style),
                Span::styled(product.title.clone(), self.theme.value_style),
                Span::styled(
                    format!("  Rp {}", format_rupiah(product.price)),
                    self.theme.accent_style,
                ),
            ]));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("Kata Mereka (F4): {} testimoni", catalog.testimonials.len()),
            self.theme.label_style,
        )));
        f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
    }

    fn draw_tools(&self, f: &mut Frame, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(33),
                Constraint::Percentage(34),
                Constraint::Percentage(33),
            ])
            .split(area);

        self.draw_tool_card(
            f,
            columns[0],
            "Cek Kesehatan Keuangan",
            ToolId::Financial,
            self.financial_lines(),
        );
        self.draw_tool_card(
            f,
            columns[1],
            "Planner Perjalanan",
            ToolId::Timeline,
            self.timeline_lines(),
        );
        self.draw_tool_card(
            f,
            columns[2],
            "Smart Chef AI",
            ToolId::Recipe,
            self.recipe_lines(),
        );
    }

    fn draw_tool_card(
        &self,
        f: &mut Frame,
        area: Rect,
        title: &str,
        tool: ToolId,
        lines: Vec<Line<'static>>,
    ) {
        let border_style = if self.focus == tool {
            self.theme.nav_active_style
        } else {
            self.theme.muted_style
        };
        let card = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style)
                    .title(title.to_string()),
            );
        f.render_widget(card, area);
    }

    fn field_line(&self, label: &str, value: &str, active: bool) -> Line<'static> {
        let marker = if active { "› " } else { "  " };
        let value_style = if active {
            self.theme.selection_style
        } else {
            self.theme.value_style
        };
        Line::from(vec![
            Span::styled(marker.to_string(), self.theme.accent_style),
            Span::styled(format!("{label}: "), self.theme.label_style),
            Span::styled(value.to_string(), value_style),
        ])
    }

    fn advice_lines(&self, header: &str, text: &str) -> Vec<Line<'static>> {
        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("✨ {header}"),
                self.theme.heading_style,
            )),
        ];
        lines.extend(render_blocks(&format_blocks(text), &self.theme));
        lines
    }

    fn financial_lines(&self) -> Vec<Line<'static>> {
        let active = self.focus == ToolId::Financial;
        let mut lines = vec![
            self.field_line(
                "Pemasukan Bulanan",
                &self.financial.income,
                active && self.field == 0,
            ),
            self.field_line(
                "Pengeluaran Bulanan",
                &self.financial.expense,
                active && self.field == 1,
            ),
        ];
        if let Some(report) = &self.financial.report {
            let style = if report.savings >= 0.0 {
                self.theme.positive_style
            } else {
                self.theme.negative_style
            };
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("Sisa: Rp {}", format_signed_rupiah(report.savings)),
                style,
            )));
            lines.push(Line::from(Span::styled(
                format!("Ratio: {:.1}%", report.ratio),
                style,
            )));
        }
        if self.financial.busy {
            lines.push(Line::from(Span::styled(
                "Meminta saran AI...",
                self.theme.busy_style,
            )));
        }
        if let Some(advice) = &self.financial.advice {
            lines.extend(self.advice_lines("Saran AI:", advice));
        }
        lines
    }

    fn timeline_lines(&self) -> Vec<Line<'static>> {
        let active = self.focus == ToolId::Timeline;
        let mut lines = vec![
            self.field_line(
                "Tipe Perjalanan (←/→)",
                self.timeline.trip.label(),
                active && self.field == 0,
            ),
            self.field_line(
                "Durasi (Hari)",
                &self.timeline.duration,
                active && self.field == 1,
            ),
            self.field_line(
                "Tujuan Liburan",
                &self.timeline.destination,
                active && self.field == 2,
            ),
            self.field_line(
                "Target Dana (Rp)",
                &self.timeline.target,
                active && self.field == 3,
            ),
            self.field_line(
                "Tabungan / Bulan",
                &self.timeline.saving,
                active && self.field == 4,
            ),
        ];
        if let Some(months) = self.timeline.months {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("Bisa berangkat dalam: {months} bulan"),
                self.theme.positive_style,
            )));
        }
        if self.timeline.busy {
            lines.push(Line::from(Span::styled(
                "Menyusun itinerary...",
                self.theme.busy_style,
            )));
        }
        if let Some(itinerary) = &self.timeline.itinerary {
            let header = format!(
                "Rencana {} {} Hari:",
                self.timeline.trip.label(),
                self.timeline.duration
            );
            lines.extend(self.advice_lines(&header, itinerary));
        }
        lines
    }

    fn recipe_lines(&self) -> Vec<Line<'static>> {
        let active = self.focus == ToolId::Recipe;
        let mut lines = vec![
            Line::from(Span::styled(
                "Punya bahan sisa di kulkas? Masukkan di sini, biarkan AI yang memikirkan menunya.",
                self.theme.label_style,
            )),
            self.field_line("Bahan", &self.recipe.ingredients, active && self.field == 0),
        ];
        if !self.recipe.can_generate() && !self.recipe.busy {
            lines.push(Line::from(Span::styled(
                "(isi bahan dulu untuk mengaktifkan resep AI)",
                self.theme.muted_style,
            )));
        }
        if self.recipe.busy {
            lines.push(Line::from(Span::styled(
                "Meracik resep...",
                self.theme.busy_style,
            )));
        }
        if let Some(recipe) = &self.recipe.recipe {
            lines.extend(self.advice_lines("Resep untukmu:", recipe));
        }
        lines
    }

    fn draw_products(&self, f: &mut Frame, area: Rect, catalog: &Catalog) {
        let title_width = catalog
            .products
            .iter()
            .map(|product| product.title.width())
            .max()
            .unwrap_or(0);

        let mut lines = Vec::new();
        for (index, product) in catalog.products.iter().enumerate() {
            let selected = index == self.selected_product;
            let marker = if selected { "› " } else { "  " };
            let glyph = if product.image_available(&self.data_dir) {
                "🖼 "
            } else {
                "▦ "
            };
            let padding = " ".repeat(title_width.saturating_sub(product.title.width()) + 2);
            let title_style = if selected {
                self.theme.selection_style
            } else {
                self.theme.value_style
            };
            lines.push(Line::from(vec![
                Span::styled(marker.to_string(), self.theme.accent_style),
                Span::styled(glyph.to_string(), self.theme.muted_style),
                Span::styled(product.title.clone(), title_style),
                Span::raw(padding),
                Span::styled(format!("[{}]", product.category), self.theme.label_style),
                Span::styled(
                    format!("  Rp {}", format_rupiah(product.price)),
                    self.theme.accent_style,
                ),
            ]));
            if selected {
                lines.push(Line::from(Span::styled(
                    format!("    {}", product.description),
                    self.theme.text_style,
                )));
                for feature in product.features.iter().take(3) {
                    lines.push(Line::from(vec![
                        Span::styled("    ✓ ", self.theme.positive_style),
                        Span::styled(feature.clone(), self.theme.label_style),
                    ]));
                }
            }
        }
        let list = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Katalog Template"),
        );
        f.render_widget(list, area);
    }

    fn draw_testimonials(&self, f: &mut Frame, area: Rect, catalog: &Catalog) {
        let mut lines = Vec::new();
        for testimonial in &catalog.testimonials {
            let stars = "★".repeat(testimonial.rating.min(5) as usize);
            lines.push(Line::from(Span::styled(stars, self.theme.accent_style)));
            lines.push(Line::from(Span::styled(
                format!("\"{}\"", testimonial.text),
                self.theme.text_style,
            )));
            lines.push(Line::from(vec![
                Span::styled(testimonial.name.clone(), self.theme.value_style),
                Span::styled(
                    format!(" — {}", testimonial.role),
                    self.theme.muted_style,
                ),
            ]));
            lines.push(Line::from(""));
        }
        let panel = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Pengalaman Pengguna"),
        );
        f.render_widget(panel, area);
    }

    fn draw_checkout(&self, f: &mut Frame, catalog: &Catalog) {
        let Some(form) = &self.checkout else {
            return;
        };
        let Some(product) = catalog.products.get(form.product_index) else {
            return;
        };

        let area = centered_rect(60, 14, f.area());
        f.render_widget(Clear, area);

        let ready = Order {
            product,
            buyer_name: &form.name,
            buyer_email: &form.email,
        }
        .is_complete();

        let mut lines = vec![
            Line::from(vec![
                Span::styled(product.title.clone(), self.theme.value_style),
                Span::styled(
                    format!("  Rp {}", format_rupiah(product.price)),
                    self.theme.accent_style,
                ),
            ]),
            Line::from(""),
            self.field_line("Nama Lengkap", &form.name, !form.editing_email),
            self.field_line("Email", &form.email, form.editing_email),
            Line::from(""),
        ];
        if let Some(link) = &form.link {
            lines.push(Line::from(Span::styled(
                "Buka tautan ini untuk menyelesaikan pesanan:",
                self.theme.positive_style,
            )));
            lines.push(Line::from(Span::styled(
                link.clone(),
                self.theme.nav_active_style,
            )));
        } else if ready {
            lines.push(Line::from(Span::styled(
                "Enter: Beli via WhatsApp",
                self.theme.positive_style,
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Isi nama dan email untuk melanjutkan",
                self.theme.muted_style,
            )));
        }
        lines.push(Line::from(Span::styled(
            "Tab: ganti isian · Esc: tutup",
            self.theme.muted_style,
        )));

        let modal = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(self.theme.nav_active_style)
                .title("Detail Pesanan"),
        );
        f.render_widget(modal, area);
    }
}

fn format_signed_rupiah(value: f64) -> String {
    let rounded = value.round() as i64;
    if rounded < 0 {
        format!("-{}", format_rupiah(rounded.unsigned_abs()))
    } else {
        format_rupiah(rounded as u64)
    }
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Drive the shell until the user quits: drain background events, redraw
/// when dirty, and poll the terminal for input at a 50 ms cadence.
pub async fn run_shell<B: Backend>(
    terminal: &mut Terminal<B>,
    shell: &mut Shell,
) -> Result<(), Box<dyn std::error::Error>> {
    shell.spawn_catalog_load();
    loop {
        while let Ok(event) = shell.rx.try_recv() {
            shell.apply(event);
        }

        if shell.dirty {
            terminal.draw(|f| shell.draw(f))?;
            shell.dirty = false;
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if !shell.handle_key(key) {
                    return Ok(());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::advice::{AdviceClient, Credential, ADVICE_UNCONFIGURED};
    use crate::core::catalog::{fallback_products, fallback_testimonials};
    use crate::core::checkout::DEFAULT_WHATSAPP_PHONE;

    fn test_shell() -> Shell {
        let advice = AdviceClient::new(Credential::Unconfigured, None);
        let mut shell = Shell::new(
            advice,
            DEFAULT_WHATSAPP_PHONE.to_string(),
            PathBuf::from("data"),
        );
        shell.apply(ShellEvent::CatalogLoaded(Catalog {
            products: fallback_products(),
            testimonials: fallback_testimonials(),
        }));
        shell
    }

    fn press(shell: &mut Shell, code: KeyCode) {
        shell.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(shell: &mut Shell, text: &str) {
        for ch in text.chars() {
            press(shell, KeyCode::Char(ch));
        }
    }

    #[test]
    fn function_keys_switch_views() {
        let mut shell = test_shell();
        press(&mut shell, KeyCode::F(3));
        assert_eq!(shell.view, View::Products);
        press(&mut shell, KeyCode::F(2));
        assert_eq!(shell.view, View::Tools);
    }

    #[test]
    fn typing_and_enter_drive_the_financial_widget() {
        let mut shell = test_shell();
        press(&mut shell, KeyCode::F(2));
        type_text(&mut shell, "5000000");
        press(&mut shell, KeyCode::Down);
        type_text(&mut shell, "3000000");
        press(&mut shell, KeyCode::Enter);

        let report = shell.financial.report.unwrap();
        assert_eq!(report.savings, 2_000_000.0);
        assert_eq!(report.ratio, 40.0);
    }

    #[test]
    fn ctrl_c_requests_quit() {
        let mut shell = test_shell();
        let quit = shell.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!quit);
    }

    #[test]
    fn checkout_flow_builds_the_deep_link() {
        let mut shell = test_shell();
        press(&mut shell, KeyCode::F(3));
        press(&mut shell, KeyCode::Enter);
        assert!(shell.checkout.is_some());

        // Confirm is a no-op while the form is incomplete.
        press(&mut shell, KeyCode::Enter);
        assert!(shell.checkout.as_ref().unwrap().link.is_none());

        type_text(&mut shell, "Sari Dewi");
        press(&mut shell, KeyCode::Tab);
        type_text(&mut shell, "sari@example.com");
        press(&mut shell, KeyCode::Enter);

        let link = shell.checkout.as_ref().unwrap().link.clone().unwrap();
        assert!(link.starts_with("https://wa.me/6281234567890?text="));
        assert!(link.contains("49.000"));
        assert!(link.contains("Sari%20Dewi"));

        press(&mut shell, KeyCode::Esc);
        assert!(shell.checkout.is_none());
    }

    #[tokio::test]
    async fn advice_round_trip_lands_in_the_widget() {
        let mut shell = test_shell();
        press(&mut shell, KeyCode::F(2));
        type_text(&mut shell, "4000000");
        press(&mut shell, KeyCode::Enter);
        shell.handle_key(KeyEvent::new(KeyCode::Char('g'), KeyModifiers::CONTROL));
        assert!(shell.financial.busy);

        let event = shell.rx.recv().await.unwrap();
        shell.apply(event);
        assert_eq!(shell.financial.advice.as_deref(), Some(ADVICE_UNCONFIGURED));
        assert_eq!(shell.advice.requests_issued(), 0);
    }
}
