use super::state::{Ending, GameState, Phase};
use crate::consts;
use crate::util::{center_rect, get_display_area};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Margin, Position, Rect, Size},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Widget},
};

/// Size of the bordered box around the grid
const BOARD_SIZE: Size = Size {
    width: consts::GRID_SIZE * consts::CELL_WIDTH + 2,
    height: consts::GRID_SIZE + 2,
};

impl Widget for &GameState {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let [status_area, board_area, hints_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(BOARD_SIZE.height),
            Constraint::Length(1),
        ])
        .areas(display);

        Line::styled(
            format!(
                " Score: {}   High score: {}   Speed: {} ms   Theme: {}",
                self.score,
                self.high_score,
                self.tick_interval.as_millis(),
                self.theme,
            ),
            consts::STATUS_BAR_STYLE,
        )
        .render(status_area, buf);

        let block_area = center_rect(board_area, BOARD_SIZE);
        Block::bordered().render(block_area, buf);
        let mut grid = Canvas {
            area: block_area.inner(Margin::new(1, 1)),
            buf,
        };
        // Particles go first so that everything else is drawn over them
        for p in &self.particles {
            if let Some(pos) = p.screen_position() {
                let mut style = Style::new().fg(p.color);
                if p.fading() {
                    style = style.add_modifier(Modifier::DIM);
                }
                grid.draw_char(pos, p.symbol(), style);
            }
        }
        if let Some(food) = self.food {
            let spec = food.kind.spec();
            let pulse = if (self.frame / consts::PULSE_PERIOD) % 2 == 0 {
                Modifier::BOLD
            } else {
                Modifier::DIM
            };
            grid.draw_cell(
                food.position,
                &spec.symbol.to_string(),
                Style::new().fg(spec.color).add_modifier(pulse),
            );
        }
        let tail = self.snake.tail();
        for (i, pos) in self.snake.segments().enumerate() {
            let color = self.theme.segment_color(i, self.frame);
            if i == 0 {
                grid.draw_cell(
                    pos,
                    consts::SNAKE_HEAD_SYMBOL,
                    Style::new().fg(color).add_modifier(Modifier::BOLD),
                );
            } else if pos == tail {
                grid.draw_cell(pos, consts::SNAKE_TAIL_SYMBOL, Style::new().fg(color));
            } else {
                grid.draw_cell(pos, consts::SNAKE_BODY_SYMBOL, Style::new().fg(color));
            }
        }
        if self.phase == Phase::Over(Ending::Collision) {
            grid.draw_cell(
                self.snake.head(),
                consts::COLLISION_SYMBOL,
                consts::COLLISION_STYLE,
            );
        }

        Line::from_iter([
            Span::raw(" "),
            Span::styled("← ↑ ↓ →", consts::KEY_STYLE),
            Span::raw(": move   "),
            Span::styled("Space", consts::KEY_STYLE),
            Span::raw(": start/pause   "),
            Span::styled("q", consts::KEY_STYLE),
            Span::raw(": quit"),
        ])
        .render(hints_area, buf);

        if let Some(banner) = self.banner() {
            let banner_area = center_rect(
                block_area,
                Size {
                    width: Banner::WIDTH,
                    height: Banner::HEIGHT,
                },
            );
            banner.render(banner_area, buf);
        }
    }
}

impl GameState {
    /// Return the pop-up to show over the grid in the current phase, if any
    fn banner(&self) -> Option<Banner> {
        let play_again = || {
            Line::from_iter([
                Span::styled("Space", consts::KEY_STYLE),
                Span::raw(" to play again"),
            ])
        };
        match self.phase {
            Phase::Running => None,
            Phase::Ready => Some(Banner {
                title: " PRISMSNAKE ",
                lines: [
                    Line::from("Eat the food, but"),
                    Line::from("don't hit anything!"),
                    Line::from_iter([
                        Span::styled("Space", consts::KEY_STYLE),
                        Span::raw(" to start"),
                    ]),
                ],
            }),
            Phase::Paused => Some(Banner {
                title: " PAUSED ",
                lines: [
                    Line::default(),
                    Line::from_iter([
                        Span::styled("Space", consts::KEY_STYLE),
                        Span::raw(" to resume"),
                    ]),
                    Line::default(),
                ],
            }),
            Phase::Over(ending) => Some(Banner {
                title: match ending {
                    Ending::Collision => " GAME OVER ",
                    Ending::BoardFilled => " BOARD FILLED! ",
                },
                lines: [
                    Line::from(format!("Score: {}", self.score)),
                    Line::from(format!("High score: {}", self.high_score)),
                    play_again(),
                ],
            }),
        }
    }
}

/// A pop-up message box drawn over the middle of the grid
#[derive(Clone, Debug, Eq, PartialEq)]
struct Banner {
    title: &'static str,
    lines: [Line<'static>; 3],
}

impl Banner {
    /// The height that should be used for the `Rect` passed to
    /// `Banner::render()`
    const HEIGHT: u16 = 5;

    /// The width that should be used for the `Rect` passed to
    /// `Banner::render()`
    const WIDTH: u16 = 26;
}

impl Widget for Banner {
    /*
     * ┌────── GAME OVER ───────┐
     * │       Score: 30        │
     * │     High score: 120    │
     * │ Space to play again    │
     * └────────────────────────┘
     */

    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);
        let block = Block::bordered()
            .title(self.title)
            .title_alignment(Alignment::Center)
            .style(Style::reset());
        let inner = block.inner(area);
        block.render(area, buf);
        for (line, row) in self.lines.into_iter().zip(inner.rows()) {
            line.centered().render(row, buf);
        }
    }
}

/// Draws onto the grid, one terminal cell at a time.  Positions are relative
/// to the top-left corner of the grid; anything outside it is clipped.
#[derive(Debug, Eq, PartialEq)]
struct Canvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    /// Draw a single character at the given terminal column & row
    fn draw_char(&mut self, pos: Position, symbol: char, style: Style) {
        if pos.x >= self.area.width || pos.y >= self.area.height {
            return;
        }
        let x = self.area.x.saturating_add(pos.x);
        let y = self.area.y.saturating_add(pos.y);
        if let Some(cell) = self.buf.cell_mut((x, y)) {
            cell.set_char(symbol);
            cell.set_style(Style::reset().patch(style));
        }
    }

    /// Draw `symbol` (at most [`consts::CELL_WIDTH`] characters) in the grid
    /// cell at `pos`
    fn draw_cell(&mut self, pos: Position, symbol: &str, style: Style) {
        let Some(x) = pos.x.checked_mul(consts::CELL_WIDTH) else {
            return;
        };
        for (offset, ch) in (0..consts::CELL_WIDTH).zip(symbol.chars()) {
            self.draw_char(Position::new(x + offset, pos.y), ch, style);
        }
    }
}
