use std::io;
use std::time::Instant;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};
use ratatui::Terminal;

use crate::core::{HostNameSource, Launcher, Resolution};
use crate::error::LauncherError;
use crate::form::{DeviceForm, PathPick};
use crate::invoker::Invoker;
use crate::models::{DeviceRecord, ProjectEntry};
use crate::storage::DocumentStore;

/// 菜单面板
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuPanel {
    Projects,
    Devices,
}

impl MenuPanel {
    const ALL: [MenuPanel; 2] = [MenuPanel::Projects, MenuPanel::Devices];

    fn label(self) -> &'static str {
        match self {
            MenuPanel::Projects => "Projects",
            MenuPanel::Devices => "Devices",
        }
    }
}

/// 焦点区域：菜单 or 内容
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Menu,
    Content,
}

/// 内容区域的输入模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// 浏览列表
    Normal,
    /// 输入项目过滤条件
    Filtering,
    /// 填写设备表单
    Editing,
    /// 确认删除设备
    Deleting,
}

/// 表单中的字段位置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormField {
    DeviceName,
    CliPath,
    ProjectName(usize),
    ProjectPath(usize),
}

impl FormField {
    fn from_index(idx: usize) -> Self {
        match idx {
            0 => FormField::DeviceName,
            1 => FormField::CliPath,
            n if n % 2 == 0 => FormField::ProjectName((n - 2) / 2),
            n => FormField::ProjectPath((n - 3) / 2),
        }
    }

    fn project_index(self) -> Option<usize> {
        match self {
            FormField::ProjectName(i) | FormField::ProjectPath(i) => Some(i),
            _ => None,
        }
    }
}

/// TUI 应用状态
pub struct App<S, H> {
    launcher: Launcher<S, H>,
    invoker: Invoker,
    selected_menu: usize,
    focus: Focus,
    status_message: String,
    running: bool,
    content_items: Vec<String>,
    content_selected: usize,
    input_mode: InputMode,
    /// 当前设备解析结果（Projects 面板）
    resolution: Option<Resolution>,
    /// 过滤后可见的项目
    visible_projects: Vec<ProjectEntry>,
    filter: String,
    /// 所有设备（Devices 面板）
    devices: Vec<(String, DeviceRecord)>,
    host_name: String,
    form: Option<DeviceForm>,
    /// 表单中当前编辑的字段下标
    form_field: usize,
}

impl<S: DocumentStore, H: HostNameSource> App<S, H> {
    /// 创建 App 实例；没有任何设备时直接进入 Devices 面板
    pub fn new(launcher: Launcher<S, H>, invoker: Invoker) -> Self {
        let host_name = launcher.current_device_name();
        let mut app = Self {
            launcher,
            invoker,
            selected_menu: 0,
            focus: Focus::Menu,
            status_message: "Ready".to_string(),
            running: true,
            content_items: Vec::new(),
            content_selected: 0,
            input_mode: InputMode::Normal,
            resolution: None,
            visible_projects: Vec::new(),
            filter: String::new(),
            devices: Vec::new(),
            host_name,
            form: None,
            form_field: 0,
        };
        if app.launcher.document().is_empty() {
            app.selected_menu = 1;
            app.focus = Focus::Content;
            app.set_status("No devices configured: press 'n' to add one");
        }
        app.refresh_content();
        app
    }

    pub fn launcher(&self) -> &Launcher<S, H> {
        &self.launcher
    }

    pub fn selected_panel(&self) -> MenuPanel {
        MenuPanel::ALL[self.selected_menu]
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }

    fn report_error(&mut self, err: &LauncherError) {
        self.set_status(format!("{}: {}", err.title(), err));
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn input_mode(&self) -> InputMode {
        self.input_mode
    }

    pub fn content_items(&self) -> &[String] {
        &self.content_items
    }

    pub fn content_selected(&self) -> usize {
        self.content_selected
    }

    pub fn form(&self) -> Option<&DeviceForm> {
        self.form.as_ref()
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// 根据当前面板刷新内容列表；每次都重新读取配置文件
    pub fn refresh_content(&mut self) {
        self.content_items = match self.selected_panel() {
            MenuPanel::Projects => {
                let resolution = self.launcher.resolve();
                let needle = self.filter.to_lowercase();
                self.visible_projects = resolution
                    .device
                    .record()
                    .projects
                    .iter()
                    .filter(|p| {
                        p.name.to_lowercase().contains(&needle)
                            || p.path.to_lowercase().contains(&needle)
                    })
                    .cloned()
                    .collect();
                self.resolution = Some(resolution);
                self.visible_projects
                    .iter()
                    .map(|p| format!("{}  {}", p.name, p.path))
                    .collect()
            }
            MenuPanel::Devices => {
                self.devices = self.launcher.list_devices();
                self.devices
                    .iter()
                    .map(|(_, d)| {
                        let current = if d.name == self.host_name { " [current]" } else { "" };
                        format!("{} ({} projects){}", d.name, d.projects.len(), current)
                    })
                    .collect()
            }
        };
        // 修正选中索引
        if self.content_items.is_empty() {
            self.content_selected = 0;
        } else if self.content_selected >= self.content_items.len() {
            self.content_selected = self.content_items.len() - 1;
        }
    }

    /// 启动 TUI 事件循环
    pub fn run(&mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> io::Result<()> {
        while self.running {
            terminal.draw(|frame| self.render(frame))?;

            // 带超时轮询，使表单错误能按时隐藏
            if !event::poll(std::time::Duration::from_millis(250))? {
                continue;
            }
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                self.handle_key(key);
            }
        }
        Ok(())
    }

    /// 处理键盘输入
    pub fn handle_key(&mut self, key: KeyEvent) {
        match self.input_mode {
            InputMode::Editing => {
                self.handle_form_key(key);
                return;
            }
            InputMode::Deleting => {
                self.handle_delete_key(key.code);
                return;
            }
            InputMode::Filtering => {
                self.handle_filter_key(key.code);
                return;
            }
            InputMode::Normal => {}
        }

        match key.code {
            KeyCode::Char('q') => self.running = false,
            KeyCode::Tab => {
                self.focus = match self.focus {
                    Focus::Menu => Focus::Content,
                    Focus::Content => Focus::Menu,
                };
            }
            code if self.focus == Focus::Menu => self.handle_menu_key(code),
            code => self.handle_content_key(code),
        }
    }

    /// 菜单区域按键处理
    fn handle_menu_key(&mut self, code: KeyCode) {
        let prev = self.selected_menu;
        match code {
            KeyCode::Up => {
                if self.selected_menu > 0 {
                    self.selected_menu -= 1;
                }
            }
            KeyCode::Down => {
                if self.selected_menu < MenuPanel::ALL.len() - 1 {
                    self.selected_menu += 1;
                }
            }
            KeyCode::Enter => {
                self.focus = Focus::Content;
            }
            _ => {}
        }
        if self.selected_menu != prev {
            self.content_selected = 0;
            self.refresh_content();
        }
    }

    /// 内容区域 Normal 模式按键处理
    fn handle_content_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up => {
                if self.content_selected > 0 {
                    self.content_selected -= 1;
                }
            }
            KeyCode::Down => {
                if !self.content_items.is_empty()
                    && self.content_selected < self.content_items.len() - 1
                {
                    self.content_selected += 1;
                }
            }
            KeyCode::Char('r') => {
                self.refresh_content();
                self.set_status("Reloaded");
            }
            _ => match self.selected_panel() {
                MenuPanel::Projects => self.handle_projects_key(code),
                MenuPanel::Devices => self.handle_devices_key(code),
            },
        }
    }

    fn handle_projects_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Enter => self.open_selected(),
            KeyCode::Char('/') => {
                self.input_mode = InputMode::Filtering;
                self.set_status("Filter: type to search, Enter=keep, Esc=clear");
            }
            KeyCode::Char('c') => {
                self.selected_menu = 1;
                self.content_selected = 0;
                self.refresh_content();
            }
            _ => {}
        }
    }

    fn handle_devices_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('n') => self.start_new_device(),
            KeyCode::Char('e') | KeyCode::Enter => self.start_edit_device(),
            KeyCode::Char('d') => {
                if !self.devices.is_empty() {
                    self.input_mode = InputMode::Deleting;
                    self.set_status("Delete device and all its projects? y=confirm, n/Esc=cancel");
                }
            }
            _ => {}
        }
    }

    /// 用当前设备的 CLI 打开选中的项目
    fn open_selected(&mut self) {
        let Some(project) = self.visible_projects.get(self.content_selected).cloned() else {
            return;
        };
        let Some(resolution) = self.resolution.as_ref() else {
            return;
        };
        let cli_path = resolution.device.record().cli_path.clone();
        match self.invoker.open(&cli_path, &project.path) {
            Ok(()) => self.set_status(format!("Opened: {}", project.name)),
            Err(e) => {
                let title = if e.is_not_found() {
                    "CLI not found"
                } else if e.is_timeout() {
                    "Timed out"
                } else {
                    "Open failed"
                };
                self.set_status(format!("{}: {}", title, e));
            }
        }
    }

    fn handle_filter_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.filter.clear();
                self.input_mode = InputMode::Normal;
                self.set_status("Filter cleared");
            }
            KeyCode::Enter => {
                self.input_mode = InputMode::Normal;
                self.set_status(format!("Filter: {}", self.filter));
            }
            KeyCode::Backspace => {
                self.filter.pop();
            }
            KeyCode::Char(c) => self.filter.push(c),
            _ => return,
        }
        self.content_selected = 0;
        self.refresh_content();
    }

    fn start_new_device(&mut self) {
        let doc = self.launcher.document();
        self.form = Some(DeviceForm::new_device(&self.host_name, &doc));
        self.form_field = 0;
        self.input_mode = InputMode::Editing;
        self.set_status("New device: Tab=next field, Ctrl+S=save, Esc=cancel");
    }

    fn start_edit_device(&mut self) {
        let Some((id, record)) = self.devices.get(self.content_selected).cloned() else {
            return;
        };
        self.form = Some(DeviceForm::edit(&id, record));
        self.form_field = 0;
        self.input_mode = InputMode::Editing;
        self.set_status("Edit device: Tab=next field, Ctrl+S=save, Esc=cancel");
    }

    fn form_field_count(&self) -> usize {
        self.form.as_ref().map_or(0, |f| 2 + f.projects().len() * 2)
    }

    fn current_field_value(&self) -> String {
        let Some(form) = self.form.as_ref() else {
            return String::new();
        };
        match FormField::from_index(self.form_field) {
            FormField::DeviceName => form.name().to_string(),
            FormField::CliPath => form.cli_path().to_string(),
            FormField::ProjectName(i) => form.projects()[i].name.clone(),
            FormField::ProjectPath(i) => form.projects()[i].path.clone(),
        }
    }

    fn set_current_field_value(&mut self, value: String) {
        let field = FormField::from_index(self.form_field);
        let Some(form) = self.form.as_mut() else {
            return;
        };
        let result = match field {
            FormField::DeviceName => {
                form.set_name(value);
                Ok(())
            }
            FormField::CliPath => {
                form.set_cli_path(value);
                Ok(())
            }
            FormField::ProjectName(i) => form.set_project_name(i, value),
            FormField::ProjectPath(i) => form.set_project_path(i, value),
        };
        if let Err(e) = result {
            self.report_error(&e);
        }
    }

    /// 表单模式按键处理
    fn handle_form_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => {
                self.form = None;
                self.input_mode = InputMode::Normal;
                self.set_status("Cancelled");
            }
            KeyCode::Tab | KeyCode::Down => {
                let count = self.form_field_count();
                if count > 0 {
                    self.form_field = (self.form_field + 1) % count;
                }
            }
            KeyCode::BackTab | KeyCode::Up => {
                if self.form_field > 0 {
                    self.form_field -= 1;
                }
            }
            KeyCode::Char('s') if ctrl => self.submit_form(),
            KeyCode::Char('n') if ctrl => {
                if let Some(form) = self.form.as_mut() {
                    let idx = form.add_project();
                    self.form_field = 2 + idx * 2;
                    self.set_status(format!("Project {} added", idx + 1));
                }
            }
            KeyCode::Char('d') if ctrl => self.remove_current_project(),
            KeyCode::Char('p') if ctrl => self.pick_current_path(),
            KeyCode::Backspace => {
                let mut value = self.current_field_value();
                value.pop();
                self.set_current_field_value(value);
            }
            KeyCode::Char(c) if !ctrl => {
                let mut value = self.current_field_value();
                value.push(c);
                self.set_current_field_value(value);
            }
            _ => {}
        }
    }

    fn remove_current_project(&mut self) {
        let Some(index) = FormField::from_index(self.form_field).project_index() else {
            self.set_status("Move to a project field to remove it");
            return;
        };
        let Some(form) = self.form.as_mut() else {
            return;
        };
        match form.remove_project(index) {
            Ok(_) => {
                let count = 2 + form.projects().len() * 2;
                if self.form_field >= count {
                    self.form_field = count - 1;
                }
                self.set_status(format!("Project {} removed", index + 1));
            }
            Err(e) => self.report_error(&e),
        }
    }

    /// 把当前路径字段当作目录选择结果，检查标记文件
    fn pick_current_path(&mut self) {
        let FormField::ProjectPath(index) = FormField::from_index(self.form_field) else {
            self.set_status("Move to a project path field to check it");
            return;
        };
        let selected = self.current_field_value();
        let Some(form) = self.form.as_mut() else {
            return;
        };
        match form.pick_project_path(index, selected.trim(), Instant::now()) {
            Ok(PathPick::Accepted { autofilled_name: Some(name) }) => {
                self.set_status(format!("Valid project directory: {}", name));
            }
            Ok(PathPick::Accepted { autofilled_name: None }) => {
                self.set_status("Valid project directory");
            }
            Ok(PathPick::Rejected) => self.set_status("Invalid path: not a project directory"),
            Ok(PathPick::KeptPrevious) => {
                self.set_status("Invalid path: not a project directory, keeping previous path");
            }
            Err(e) => self.report_error(&e),
        }
    }

    fn submit_form(&mut self) {
        let Some(form) = self.form.as_mut() else {
            return;
        };
        match form.submit(self.launcher.store(), Instant::now()) {
            Ok(outcome) => {
                self.form = None;
                self.input_mode = InputMode::Normal;
                self.set_status(format!("Saved: device '{}'", outcome.device_name));
                self.refresh_content();
            }
            Err(e) => self.report_error(&e),
        }
    }

    /// 删除模式按键处理
    fn handle_delete_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('y') => self.confirm_delete(),
            KeyCode::Char('n') | KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
                self.set_status("Cancelled");
            }
            _ => {}
        }
    }

    fn confirm_delete(&mut self) {
        if let Some((id, record)) = self.devices.get(self.content_selected).cloned() {
            match self.launcher.delete_device(&id) {
                Ok(_) => self.set_status(format!("Deleted: device '{}'", record.name)),
                Err(e) => self.report_error(&e),
            }
        }
        self.input_mode = InputMode::Normal;
        self.refresh_content();
    }

    /// 渲染整个界面
    fn render(&self, frame: &mut ratatui::Frame) {
        let area = frame.area();

        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(1),
                Constraint::Length(3),
            ])
            .split(area);

        self.render_title(frame, outer[0]);
        self.render_body(frame, outer[1]);
        self.render_status(frame, outer[2]);
    }

    fn render_title(&self, frame: &mut ratatui::Frame, area: Rect) {
        let title = Paragraph::new(format!("DevTool Launcher - {}", self.host_name))
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, area);
    }

    fn render_body(&self, frame: &mut ratatui::Frame, area: Rect) {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(16), Constraint::Min(1)])
            .split(area);

        self.render_menu(frame, cols[0]);
        self.render_content(frame, cols[1]);
    }

    fn render_menu(&self, frame: &mut ratatui::Frame, area: Rect) {
        let items: Vec<ListItem> = MenuPanel::ALL
            .iter()
            .enumerate()
            .map(|(i, panel)| {
                let style = if i == self.selected_menu {
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                let prefix = if i == self.selected_menu { "> " } else { "  " };
                ListItem::new(format!("{}{}", prefix, panel.label())).style(style)
            })
            .collect();

        let border_style = if self.focus == Focus::Menu {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let menu = List::new(items).block(
            Block::default()
                .title(" Menu ")
                .borders(Borders::ALL)
                .border_style(border_style),
        );
        frame.render_widget(menu, area);
    }

    fn render_content(&self, frame: &mut ratatui::Frame, area: Rect) {
        let panel = self.selected_panel();
        let border_style = if self.focus == Focus::Content {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let block = Block::default()
            .title(self.content_title(panel))
            .borders(Borders::ALL)
            .border_style(border_style);

        match self.input_mode {
            InputMode::Normal | InputMode::Filtering => {
                if self.content_items.is_empty() {
                    let hint = match panel {
                        MenuPanel::Projects => self.empty_projects_hint(),
                        MenuPanel::Devices => "No devices. Press 'n' to add one.".to_string(),
                    };
                    frame.render_widget(Paragraph::new(hint).block(block), area);
                } else {
                    let items: Vec<ListItem> = self
                        .content_items
                        .iter()
                        .enumerate()
                        .map(|(i, item)| {
                            let style = if i == self.content_selected {
                                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
                            } else {
                                Style::default()
                            };
                            let prefix = if i == self.content_selected { "> " } else { "  " };
                            ListItem::new(format!("{}{}", prefix, item)).style(style)
                        })
                        .collect();
                    frame.render_widget(List::new(items).block(block), area);
                }
            }
            InputMode::Editing => {
                let content = Paragraph::new(self.form_lines()).block(block);
                frame.render_widget(content, area);
            }
            InputMode::Deleting => {
                let item_name = self
                    .content_items
                    .get(self.content_selected)
                    .cloned()
                    .unwrap_or_default();
                let lines = vec![
                    Line::from(Span::styled(
                        "Delete this device and all its projects? This cannot be undone.",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )),
                    Line::from(""),
                    Line::from(format!("  {}", item_name)),
                    Line::from(""),
                    Line::from(Span::styled(
                        "y=confirm  n/Esc=cancel",
                        Style::default().fg(Color::DarkGray),
                    )),
                ];
                frame.render_widget(Paragraph::new(lines).block(block), area);
            }
        }
    }

    fn empty_projects_hint(&self) -> String {
        if !self.filter.is_empty() {
            return "No projects match the filter. Esc clears it.".to_string();
        }
        match self.resolution.as_ref() {
            Some(r) if r.uses_fallback() => format!(
                "Device \"{}\" (using \"{}\" configuration) has no projects. Press 'c' to configure.",
                r.current_name, r.effective_name
            ),
            Some(r) => format!(
                "Device \"{}\" has no projects. Press 'c' to configure.",
                r.current_name
            ),
            None => String::new(),
        }
    }

    fn form_lines(&self) -> Vec<Line<'_>> {
        let Some(form) = self.form.as_ref() else {
            return Vec::new();
        };
        let errors = form.visible_errors(Instant::now());
        let mut lines = vec![
            Line::from(Span::styled(
                if form.is_edit() { "Edit device" } else { "New device" },
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];

        let mut push_field = |idx: usize, label: String, value: &str, error: Option<&String>| {
            let is_active = idx == self.form_field;
            let indicator = if is_active { "▶ " } else { "  " };
            let label_style = if is_active {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let mut spans = vec![
                Span::raw(indicator),
                Span::styled(format!("{}: ", label), label_style),
                Span::styled(value.to_string(), Style::default().fg(Color::White)),
            ];
            if is_active {
                spans.push(Span::styled("█", Style::default().fg(Color::Cyan)));
            }
            if let Some(e) = error {
                spans.push(Span::styled(format!("  ({})", e), Style::default().fg(Color::Red)));
            }
            lines.push(Line::from(spans));
        };

        push_field(0, "Device name".into(), form.name(), errors.and_then(|e| e.device_name.as_ref()));
        push_field(1, "CLI path".into(), form.cli_path(), errors.and_then(|e| e.cli_path.as_ref()));
        for (i, project) in form.projects().iter().enumerate() {
            let project_errors = errors.and_then(|e| e.projects.get(i));
            push_field(
                2 + i * 2,
                format!("Project {} name", i + 1),
                &project.name,
                project_errors.and_then(|e| e.name.as_ref()),
            );
            push_field(
                3 + i * 2,
                format!("Project {} path", i + 1),
                &project.path,
                project_errors.and_then(|e| e.path.as_ref()),
            );
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Tab=next  Ctrl+S=save  Ctrl+N=add project  Ctrl+D=remove project  Ctrl+P=check path  Esc=cancel",
            Style::default().fg(Color::DarkGray),
        )));
        lines
    }

    /// 构建内容面板标题（含上下文信息）
    fn content_title(&self, panel: MenuPanel) -> String {
        match panel {
            MenuPanel::Projects => {
                let mut title = match self.resolution.as_ref() {
                    Some(r) if r.uses_fallback() => {
                        format!(" Projects [{} → using \"{}\"] ", r.current_name, r.effective_name)
                    }
                    Some(r) => format!(" Projects [{}] ", r.current_name),
                    None => " Projects ".to_string(),
                };
                if !self.filter.is_empty() || self.input_mode == InputMode::Filtering {
                    title.push_str(&format!("/{} ", self.filter));
                }
                title
            }
            MenuPanel::Devices => " Devices (n=new, e=edit, d=delete) ".to_string(),
        }
    }

    fn render_status(&self, frame: &mut ratatui::Frame, area: Rect) {
        let status = Line::from(vec![
            Span::styled("Status: ", Style::default().fg(Color::DarkGray)),
            Span::styled(&self.status_message, Style::default().fg(Color::Green)),
            Span::raw(" | "),
            Span::styled(
                "q:Quit  Tab:Switch  ↑↓:Navigate  Enter:Open  /:Filter  c:Configure",
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        let bar = Paragraph::new(status).block(Block::default().borders(Borders::ALL));
        frame.render_widget(bar, area);
    }
}
