mod bird;
mod ground;
mod object;
mod pipe;
mod session;

use std::collections::HashMap;

use color_eyre::eyre::Result;
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use rand::{rngs::StdRng, SeedableRng};
use ratatui::{layout::Position, prelude::*, widgets::*};
use tokio::sync::mpsc::UnboundedSender;

use super::{Frame, Page, PageId};
use crate::{
    action::{act, Action, ActionState, Command, GameAction},
    components::sprite::Sprite,
    config::PageKeyBindings,
    constants::game,
    pages::game::{
        object::Object,
        session::{Phase, Session},
    },
};

#[derive(Copy, Clone, PartialEq, Eq)]
enum ButtonItem {
    Retry,
    Menu,
}

const BUTTONS: [(ButtonItem, &str); 2] = [(ButtonItem::Retry, "[ Retry ]"), (ButtonItem::Menu, "[ Menu ]")];

pub struct GamePage {
    pub action_tx: Option<UnboundedSender<Action>>,
    pub keymap: PageKeyBindings,
    session: Session,
    rng: StdRng,
    canvas: Rect,
    hovered_button: Option<usize>,
    button_areas: Vec<Rect>,
}

impl GamePage {
    pub fn new() -> Self {
        GamePage {
            action_tx: None,
            keymap: PageKeyBindings::default(),
            session: Session::new(),
            rng: StdRng::from_entropy(),
            canvas: Rect::new(0, 0, 0, 0),
            hovered_button: None,
            button_areas: Vec::new(),
        }
    }

    /// World rect -> cell rect on the current canvas, clipped to the screen.
    fn project(&self, rect: object::Rect) -> Option<Rect> {
        let left = rect.x.max(0.0);
        let right = rect.right().min(game::SCREEN_WIDTH);
        let top = rect.y.max(0.0);
        let bottom = rect.bottom().min(game::SCREEN_HEIGHT);
        if right <= left || bottom <= top {
            return None;
        }

        let sx = self.canvas.width as f32 / game::SCREEN_WIDTH;
        let sy = self.canvas.height as f32 / game::SCREEN_HEIGHT;
        let x = (left * sx) as u16;
        let y = (top * sy) as u16;
        let width = (((right - left) * sx).round() as u16).max(1).min(self.canvas.width.saturating_sub(x));
        let height = (((bottom - top) * sy).round() as u16).max(1).min(self.canvas.height.saturating_sub(y));
        if width == 0 || height == 0 {
            return None;
        }
        Some(Rect { x: self.canvas.x + x, y: self.canvas.y + y, width, height })
    }

    fn pipe_lines(width: u16, height: u16, cap_at_bottom: bool) -> Vec<String> {
        let body_row = "|".repeat(width as usize);
        let cap_row = "█".repeat(width as usize);
        let cap_rows = height.min(2);
        let body_rows = height - cap_rows;

        let mut lines = Vec::with_capacity(height as usize);
        if cap_at_bottom {
            lines.extend(std::iter::repeat_with(|| body_row.clone()).take(body_rows as usize));
            lines.extend(std::iter::repeat_with(|| cap_row.clone()).take(cap_rows as usize));
        } else {
            lines.extend(std::iter::repeat_with(|| cap_row.clone()).take(cap_rows as usize));
            lines.extend(std::iter::repeat_with(|| body_row.clone()).take(body_rows as usize));
        }
        lines
    }

    fn draw_pipes(&self, f: &mut Frame<'_>) {
        for pipe in self.session.pipes() {
            for (rect, cap_at_bottom) in [(pipe.top_rect(), true), (pipe.bottom_rect(), false)] {
                if let Some(area) = self.project(rect) {
                    let lines = Self::pipe_lines(area.width, area.height, cap_at_bottom);
                    let sprite = Sprite::new(lines).style(Style::default().fg(game::PIPE_COLOR));
                    f.render_widget(sprite, area);
                }
            }
        }
    }

    fn draw_ground(&self, f: &mut Frame<'_>) {
        if let Some(area) = self.project(self.session.ground().bounds()) {
            let row = "#".repeat(area.width as usize);
            let lines = std::iter::repeat_with(|| row.clone()).take(area.height as usize).collect();
            let sprite = Sprite::new(lines).style(Style::default().fg(game::GROUND_COLOR));
            f.render_widget(sprite, area);
        }
    }

    fn draw_bird(&self, f: &mut Frame<'_>) {
        let Some(area) = self.project(self.session.bird().bounds()) else {
            return;
        };
        let lines: Vec<String> =
            game::BIRD_TEXT.lines().filter(|line| !line.is_empty()).map(|line| line.to_string()).collect();
        let art_width = lines.iter().map(|line| line.chars().count()).max().unwrap_or(0) as u16;
        let art_height = lines.len() as u16;
        let area = Rect { width: art_width, height: art_height, ..area }.intersection(self.canvas);
        let sprite = Sprite::new(lines).style(Style::default().fg(game::BIRD_COLOR)).transparent(true);
        f.render_widget(sprite, area);
    }

    fn draw_score(&self, f: &mut Frame<'_>) {
        let text = format!("SCORE {}   BEST {}", self.session.score(), self.session.high_score());
        let area = Rect { x: self.canvas.x + 1, y: self.canvas.y, width: self.canvas.width.saturating_sub(1), height: 1 };
        f.render_widget(Paragraph::new(text).style(Style::default().fg(Color::White)), area);
    }

    fn draw_game_over(&mut self, f: &mut Frame<'_>) {
        let [panel] = Layout::vertical([Constraint::Length(9)]).flex(layout::Flex::Center).areas(self.canvas);
        let [panel] = Layout::horizontal([Constraint::Length(30)]).flex(layout::Flex::Center).areas(panel);

        f.render_widget(Clear, panel);
        let block = Block::default()
            .title("GAME OVER")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Red));
        let inner = block.inner(panel);
        f.render_widget(block, panel);

        let lines = vec![
            Line::from(format!("Score  {}", self.session.score())),
            Line::from(format!("Best   {}", self.session.high_score())),
        ];
        let [score_area, button_area] =
            Layout::vertical([Constraint::Length(2), Constraint::Length(1)]).flex(layout::Flex::SpaceAround).areas(inner);
        f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), score_area);

        let widths: Vec<Constraint> =
            BUTTONS.iter().map(|(_, label)| Constraint::Length(label.len() as u16)).collect();
        let areas = Layout::horizontal(widths).flex(layout::Flex::SpaceAround).split(button_area);
        self.button_areas = areas.to_vec();

        for (index, ((_, label), area)) in BUTTONS.iter().zip(areas.iter()).enumerate() {
            let style = if self.hovered_button == Some(index) {
                Style::default().bg(Color::Cyan).fg(Color::Black)
            } else {
                Style::default().fg(Color::White)
            };
            f.render_widget(Paragraph::new(*label).style(style), *area);
        }
    }

    fn button_at(&self, position: Position) -> Option<usize> {
        self.button_areas.iter().position(|area| area.contains(position))
    }
}

impl Page for GamePage {
    fn id(&self) -> PageId {
        PageId::Game
    }

    fn register_keymap(&mut self, keymaps: &HashMap<PageId, PageKeyBindings>) -> Result<()> {
        if let Some(keymap) = keymaps.get(&self.id()) {
            self.keymap = keymap.clone();
        }
        Ok(())
    }

    fn register_action_handler(&mut self, tx: UnboundedSender<Action>) -> Result<()> {
        self.action_tx = Some(tx);
        Ok(())
    }

    fn handle_mouse_events(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        if self.session.phase() != Phase::GameOver {
            return Ok(None);
        }
        let position = Position::new(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Moved => {
                self.hovered_button = self.button_at(position);
                Ok(None)
            },
            MouseEventKind::Down(MouseButton::Left) => match self.button_at(position) {
                Some(index) => {
                    let action = match BUTTONS[index].0 {
                        ButtonItem::Retry => act!(Command::Game(GameAction::Retry)),
                        ButtonItem::Menu => act!(Command::Game(GameAction::Leave)),
                    };
                    Ok(Some(action))
                },
                None => Ok(None),
            },
            _ => Ok(None),
        }
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action.command {
            Command::Tick => {
                self.session.tick(&mut self.rng);
            },
            Command::StartGame => {
                self.hovered_button = None;
                self.session.begin();
            },
            Command::Game(command) if action.state == ActionState::Start => match command {
                GameAction::Flap => self.session.jump(),
                GameAction::Retry => {
                    if self.session.phase() == Phase::GameOver {
                        self.hovered_button = None;
                        self.session.begin();
                    }
                },
                GameAction::Leave => {
                    if self.session.phase() == Phase::GameOver {
                        self.session.to_menu();
                        if let Some(action_tx) = &self.action_tx {
                            action_tx.send(act!(Command::ShowHome))?;
                        }
                    }
                },
            },
            _ => {},
        }
        Ok(None)
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect) -> Result<()> {
        self.canvas = area;

        self.draw_pipes(f);
        self.draw_ground(f);
        self.draw_bird(f);
        self.draw_score(f);

        if self.session.phase() == Phase::GameOver {
            self.draw_game_over(f);
        } else {
            self.button_areas.clear();
        }

        Ok(())
    }
}
