//! Screen layout as plain text lines.

use admin_lib::format::time_ago;
use chrono::Utc;
use pagetable::{MutationMode, TableView};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, Screen};
use crate::form::FORM_TITLE;
use crate::keys::Focus;

const CURSOR: &str = "› ";
const NO_CURSOR: &str = "  ";

/// Lay out the whole screen.
pub fn render(app: &App, width: u16) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(tabs(app.screen));
    if let Some(session) = app.session() {
        lines.push(format!(
            "{} ({}) · {} · {}",
            session.name,
            session.initials(),
            session.role.label(),
            session.server_code
        ));
    }
    lines.push(String::new());

    if app.screen == Screen::Products {
        let marker = if app.focus() == Focus::Search { "▏" } else { "" };
        let loading = if app.is_loading() { "  …" } else { "" };
        lines.push(format!(
            "Ara: {}{}{}",
            app.products.search_input(),
            marker,
            loading
        ));
    }
    match app.table() {
        Some(table) => {
            let show_cursor = app.focus() != Focus::Search;
            lines.extend(table_lines(&table.view(), app.cursor(), show_cursor));
            if app.focus() == Focus::PageInput {
                lines.push(format!("Sayfaya git: {}▏", table.page_input()));
            }
        }
        None => lines.extend(command_lines(app)),
    }

    lines.extend(selection_lines(app));
    lines.push(String::new());
    lines.push(help(app.screen, app.focus()).to_string());

    for toast in app.toasts.visible() {
        lines.push(toast.text());
    }

    lines.into_iter().map(|l| clip(l, width as usize)).collect()
}

fn tabs(current: Screen) -> String {
    Screen::ALL
        .iter()
        .map(|s| {
            if *s == current {
                format!("[{}]", s.title())
            } else {
                format!(" {} ", s.title())
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Table lines with a cursor marker on the selected data row.
fn table_lines(view: &TableView, cursor: usize, show_cursor: bool) -> Vec<String> {
    view.lines()
        .into_iter()
        .enumerate()
        .map(|(i, line)| {
            // Data rows start after the header and its rule.
            let is_cursor = show_cursor
                && !view.is_empty()
                && i >= 2
                && i - 2 == cursor
                && cursor < view.row_len();
            format!("{}{}", if is_cursor { CURSOR } else { NO_CURSOR }, line)
        })
        .collect()
}

fn selection_lines(app: &App) -> Vec<String> {
    let snapshot = app.selection.snapshot();
    let Some(id) = snapshot.selected_id else {
        return Vec::new();
    };
    let name = app
        .firms
        .rows()
        .into_iter()
        .find(|f| f.id == id)
        .map(|f| f.name)
        .unwrap_or_else(|| format!("#{}", id));

    match snapshot.mutation_mode {
        Some(MutationMode::Delete) => vec![
            String::new(),
            "Firmayı Sil".to_string(),
            format!("{} firmasını silmek istediğinize emin misiniz? [e/h]", name),
        ],
        Some(MutationMode::Update) => form_lines(app, &name),
        None => Vec::new(),
    }
}

fn form_lines(app: &App, name: &str) -> Vec<String> {
    let Some(form) = app.form() else {
        return vec![String::new(), format!("Düzenlenecek firma: {}", name)];
    };
    let mut lines = vec![String::new(), format!("{}: {}", FORM_TITLE, name)];
    for (i, (label, value)) in form.rows().into_iter().enumerate() {
        let (marker, caret) = if i == form.active() {
            (CURSOR, "▏")
        } else {
            (NO_CURSOR, "")
        };
        lines.push(format!("{}{}: {}{}", marker, label, value, caret));
    }
    if let Some(error) = form.error() {
        lines.push(format!("✖ {}", error));
    }
    if app.is_updating() {
        lines.push("Kaydediliyor...".to_string());
    }
    lines
}

/// The product synchronization job and its schedule.
fn command_lines(app: &App) -> Vec<String> {
    let schedule = app.schedule();
    let last_run = app
        .job()
        .and_then(|job| job.last_ran_at)
        .map(|at| time_ago(at, Utc::now()))
        .unwrap_or_else(|| "Çalışmadı".to_string());
    let button = if app.is_syncing() {
        "[Eşleştiriliyor...]"
    } else {
        "[Şimdi çalıştır]"
    };

    vec![
        "Ürün eşleştirme komutu · Arka plan görevi".to_string(),
        String::new(),
        format!(
            "Bu komut ne kadar sık çalışmalı? {} × {}  {}",
            schedule.frequency,
            schedule.unit.label(),
            app.job_save().label()
        )
        .trim_end()
        .to_string(),
        format!("Son çalışma: {}", last_run),
        String::new(),
        button.to_string(),
    ]
}

fn help(screen: Screen, focus: Focus) -> &'static str {
    match focus {
        Focus::Table if screen == Screen::Commands => {
            "+/- sıklık · u birim · s şimdi çalıştır · Tab ekran · q çıkış"
        }
        Focus::Table => {
            "←/→ sayfa · 1-9 sırala · g sayfaya git · / ara · ↑/↓ satır · e düzenle · d sil \
             · Esc seçimi bırak · Tab ekran · q çıkış"
        }
        Focus::PageInput => "rakam yazın · Enter/Esc/Tab uygula",
        Focus::Search => "yazdıkça aranır · Esc/Enter bitir",
        Focus::Confirm => "e/Enter sil · h/Esc iptal",
        Focus::EditForm => "Tab/↑/↓ alan · Enter Kaydet · Esc İptal",
    }
}

fn clip(line: String, width: usize) -> String {
    if width == 0 || line.width() <= width {
        return line;
    }
    pagetable::render::fit(&line, width, pagetable::Alignment::Left)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use tokio::sync::mpsc::unbounded_channel;

    use super::*;
    use crate::keys::Command;
    use admin_lib::model::FirmSummary;

    fn app_with_firms() -> App {
        let (tx, _rx) = unbounded_channel();
        let app = App::new(20, None, tx);
        app.firms.set_rows(
            (1..=3)
                .map(|id| FirmSummary {
                    id,
                    name: format!("Firma {id}"),
                    dia_server_code: "S1".into(),
                    dia_firm_code: id,
                    created_at: Utc::now(),
                    updated_at: None,
                })
                .collect(),
        );
        app
    }

    #[test]
    fn test_empty_products_screen() {
        let (tx, _rx) = unbounded_channel();
        let app = App::new(20, None, tx);
        let lines = render(&app, 200);
        assert!(lines[0].starts_with("[Ürünler]"));
        assert!(lines.iter().any(|l| l.contains("bulunamadı.")));
        assert!(lines.iter().any(|l| l.contains("Sayfa: 1 / 1 · Toplam: 0")));
    }

    #[test]
    fn test_cursor_and_delete_prompt() {
        let mut app = app_with_firms();
        app.handle_command(Command::NextScreen);
        app.handle_command(Command::CursorDown);
        let lines = render(&app, 200);
        let marked: Vec<_> = lines.iter().filter(|l| l.starts_with(CURSOR)).collect();
        assert_eq!(marked.len(), 1);
        assert!(marked[0].contains("Firma 2"));

        app.handle_command(Command::Delete);
        let lines = render(&app, 200);
        assert!(
            lines
                .iter()
                .any(|l| l.contains("Firma 2 firmasını silmek istediğinize emin misiniz?"))
        );
    }

    #[test]
    fn test_edit_form_lines() {
        let mut app = app_with_firms();
        app.handle_command(Command::NextScreen);
        app.handle_command(Command::Edit);
        app.handle_command(Command::FormNext);
        app.handle_command(Command::FormChar('a'));
        let lines = render(&app, 200);
        assert!(lines.iter().any(|l| l == "Firmayı Düzenle: Firma 1"));
        assert!(lines.iter().any(|l| l == "  Firma Adı: Firma 1"));
        assert!(lines.iter().any(|l| l == "› DIA Kullanıcı Adı: a▏"));
        assert!(lines.iter().any(|l| l.contains("Enter Kaydet")));
    }

    #[test]
    fn test_commands_screen() {
        let mut app = app_with_firms();
        while app.screen != Screen::Commands {
            app.handle_command(Command::NextScreen);
        }
        let lines = render(&app, 200);
        assert!(lines[0].ends_with("[Komutlar]"));
        assert!(lines.iter().any(|l| l == "Bu komut ne kadar sık çalışmalı? 1 × Günde bir"));
        assert!(lines.iter().any(|l| l == "Son çalışma: Çalışmadı"));
        assert!(lines.iter().any(|l| l == "[Şimdi çalıştır]"));
        assert!(!lines.iter().any(|l| l.contains("Sayfa:")));
    }

    #[test]
    fn test_lines_clipped_to_width() {
        let app = app_with_firms();
        for line in render(&app, 40) {
            assert!(line.width() <= 40, "{line:?}");
        }
    }
}
