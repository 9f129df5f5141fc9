use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind}, execute, terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen}};
use ratatui::{backend::CrosstermBackend, Terminal, widgets::{Block, Borders, List, ListItem, Paragraph, ListState}, layout::{Layout, Constraint, Direction}, style::{Style, Modifier, Color}};

use todo_api::{application::todo_service::{TodoService, TodoServiceImpl}, domain::{repository::TodoRepository, todo::{CreateTodo, TodoId, UpdateTodo}}, infrastructure::memory_repo::InMemoryTodoRepository};

#[tokio::main]
async fn main() -> Result<()> {
    let service = TodoServiceImpl::new(InMemoryTodoRepository::new());

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, service).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    res
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mode { View, Create, Edit }

#[derive(Clone, Copy, PartialEq, Eq)]
enum Filter { All, Active, Completed }

struct ListEntry {
    id: TodoId,
    completed: bool,
    title: String,
    created_at: String,
    updated_at: Option<String>,
}

struct App<R: TodoRepository> {
    service: TodoServiceImpl<R>,
    items: Vec<ListEntry>,
    selected: usize,
    last_tick: Instant,
    mode: Mode,
    list_state: ListState,
    filter: Filter,
    filtered_indices: Vec<usize>,
    draft_title: String,
}

impl<R: TodoRepository> App<R> {
    async fn load(&mut self) {
        let todos = self.service.list().await;
        self.items = todos
            .into_iter()
            .map(|t| ListEntry {
                id: t.id,
                completed: t.completed,
                title: t.title,
                created_at: t.created_at.to_rfc3339(),
                updated_at: t.updated_at.map(|u| u.to_rfc3339()),
            })
            .collect();
        self.recompute_filtered();
    }

    fn recompute_filtered(&mut self) {
        self.filtered_indices.clear();
        for (i, e) in self.items.iter().enumerate() {
            let include = match self.filter {
                Filter::All => true,
                Filter::Active => !e.completed,
                Filter::Completed => e.completed,
            };
            if include { self.filtered_indices.push(i); }
        }
        // Clamp selection within filtered bounds
        let len = self.filtered_indices.len();
        if len == 0 { self.selected = 0; self.list_state.select(None); }
        else { if self.selected >= len { self.selected = len - 1; } self.list_state.select(Some(self.selected)); }
    }

    fn filter_label(&self) -> &'static str {
        match self.filter { Filter::All => "All", Filter::Active => "Active", Filter::Completed => "Completed" }
    }
}

async fn run_app<R: TodoRepository>(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>, service: TodoServiceImpl<R>) -> Result<()> {
    let tick_rate = Duration::from_millis(200);
    let mut app = App { service, items: vec![], selected: 0, last_tick: Instant::now(), mode: Mode::View, list_state: ListState::default(), filter: Filter::All, filtered_indices: Vec::new(), draft_title: String::new() };
    app.load().await;

    loop {
        terminal.draw(|f| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3),
                    Constraint::Min(1),
                    Constraint::Length(3),
                ])
                .split(f.size());

            let header = Paragraph::new("Todos (Enter: toggle, n: new, e: edit, d: delete, f: filter, q: quit)  |  New/Edit: type title, Enter to save, Esc to cancel")
                .block(Block::default().borders(Borders::ALL).title("todo-tui"));
            f.render_widget(header, chunks[0]);

            let middle = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
                .split(chunks[1]);

            let list_items: Vec<ListItem> = app.filtered_indices.iter().filter_map(|&idx| app.items.get(idx)).map(|e| {
                let mark = if e.completed { "[x]" } else { "[ ]" };
                ListItem::new(format!("{} {}", mark, e.title))
            }).collect();
            // Keep list_state selection in sync with current index
            if app.filtered_indices.is_empty() { app.list_state.select(None); } else { app.list_state.select(Some(app.selected)); }
            let list = List::new(list_items)
                .block(Block::default().borders(Borders::ALL).title(format!("items [{}] (highlighted = target for Enter/d/e)", app.filter_label())))
                .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD | Modifier::REVERSED))
                .highlight_symbol(">> ");
            f.render_stateful_widget(list, middle[0], &mut app.list_state);

            // Details pane for selected item
            let detail = if let Some(&idx) = app.filtered_indices.get(app.selected) {
                if let Some(e) = app.items.get(idx) {
                    let updated = e.updated_at.clone().unwrap_or_else(|| "(never)".to_string());
                    format!("Title:\n{}\n\nStatus: {}\n\nCreated: {}\nUpdated: {}", e.title, if e.completed { "Completed" } else { "Active" }, e.created_at, updated)
                } else { "".to_string() }
            } else { "".to_string() };
            let details = Paragraph::new(detail)
                .block(Block::default().borders(Borders::ALL).title("details"));
            f.render_widget(details, middle[1]);

            let footer_text = match app.mode {
                Mode::View => format!("in-memory store (items live for this session)  |  Filter=[{}]", app.filter_label()),
                Mode::Create => format!("Create — Title: {}_  |  (Enter to save, Esc to cancel)", app.draft_title),
                Mode::Edit => format!("Edit — Title: {}_  |  (Enter to save, Esc to cancel)", app.draft_title),
            };
            let footer = Paragraph::new(footer_text)
                .block(Block::default().borders(Borders::ALL).title(match app.mode { Mode::View => "info", Mode::Create => "create", Mode::Edit => "edit" }));
            f.render_widget(footer, chunks[2]);
        })?;

        let timeout = tick_rate.saturating_sub(app.last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                // Only act on key presses; ignore repeats and releases to prevent duplicate input
                if key.kind != KeyEventKind::Press { continue; }
                match app.mode {
                    Mode::View => match key.code {
                        KeyCode::Char('q') => break,
                        KeyCode::Up => { if app.selected > 0 { app.selected -= 1; } }
                        KeyCode::Down => { let len = app.filtered_indices.len(); if app.selected + 1 < len { app.selected += 1; } }
                        KeyCode::Enter => {
                            if let Some(&idx) = app.filtered_indices.get(app.selected) {
                                if let Some(entry) = app.items.get(idx) {
                                    let _ = app.service.update(entry.id, UpdateTodo { title: None, completed: Some(!entry.completed) }).await;
                                    app.load().await;
                                }
                            }
                        }
                        KeyCode::Char('n') => {
                            app.mode = Mode::Create;
                            app.draft_title.clear();
                        }
                        KeyCode::Char('e') => {
                            if let Some(&idx) = app.filtered_indices.get(app.selected) {
                                if let Some(entry) = app.items.get(idx) {
                                    app.mode = Mode::Edit;
                                    app.draft_title = entry.title.clone();
                                }
                            }
                        }
                        KeyCode::Char('d') => {
                            if let Some(&idx) = app.filtered_indices.get(app.selected) {
                                if let Some(entry) = app.items.get(idx) {
                                    let _ = app.service.delete(entry.id).await;
                                    if app.selected > 0 { app.selected -= 1; }
                                    app.load().await;
                                }
                            }
                        }
                        KeyCode::Char('f') => {
                            app.filter = match app.filter { Filter::All => Filter::Active, Filter::Active => Filter::Completed, Filter::Completed => Filter::All };
                            app.recompute_filtered();
                        }
                        _ => {}
                    },
                    Mode::Create => match key.code {
                        KeyCode::Esc => { app.mode = Mode::View; app.draft_title.clear(); }
                        KeyCode::Enter => {
                            let title = app.draft_title.trim();
                            if !title.is_empty() {
                                let _ = app.service.create(CreateTodo { title: title.to_string(), completed: None }).await;
                            }
                            app.mode = Mode::View;
                            app.draft_title.clear();
                            app.load().await;
                        }
                        KeyCode::Backspace => { app.draft_title.pop(); }
                        KeyCode::Char(c) => { app.draft_title.push(c); }
                        KeyCode::Left | KeyCode::Right | KeyCode::Up | KeyCode::Down => { /* ignore nav in input */ }
                        _ => {}
                    },
                    Mode::Edit => match key.code {
                        KeyCode::Esc => { app.mode = Mode::View; app.draft_title.clear(); }
                        KeyCode::Enter => {
                            if let Some(&idx) = app.filtered_indices.get(app.selected) {
                                if let Some(entry) = app.items.get(idx) {
                                    let title = app.draft_title.trim().to_string();
                                    if !title.is_empty() {
                                        let _ = app.service.update(entry.id, UpdateTodo { title: Some(title), completed: None }).await;
                                    }
                                }
                            }
                            app.mode = Mode::View;
                            app.draft_title.clear();
                            app.load().await;
                        }
                        KeyCode::Backspace => { app.draft_title.pop(); }
                        KeyCode::Char(c) => { app.draft_title.push(c); }
                        KeyCode::Left | KeyCode::Right | KeyCode::Up | KeyCode::Down => { /* ignore nav in input */ }
                        _ => {}
                    },
                }
            }
        }
        if app.last_tick.elapsed() >= tick_rate {
            app.last_tick = Instant::now();
        }
    }
    Ok(())
}
