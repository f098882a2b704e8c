//! View module.
//!
//! Handlers never print. They push [`ViewItem`]s onto the [`View`], which sorts them into
//! sections and writes one styled frame to the terminal on [`View::flush`].
use textwrap::{fill, termwidth};
use variantly::Variantly;

use crate::chat::{ChatMessage, Sender, Tone};
use crate::dice::DiceResult;
use crate::room::{Position, RoomKind};
use crate::state::{GameStatus, Snapshot};
use crate::style::{GameStyle, normal_block};

const ICON_GM: &str = "\u{2736}"; // ✶
const ICON_PLAYER: &str = "\u{25B8}"; // ▸
const ICON_SYSTEM: &str = "\u{2699}"; // ⚙
const ICON_ERROR: &str = "⚠︎"; // U+26A0 U+FE0E
const ICON_DIE: &str = "\u{2684}"; // ⚄

/// View aggregates everything to be shown after a command and then displays it in one pass.
#[derive(Debug, Clone)]
pub struct View {
    pub width: usize,
    pub items: Vec<ViewEntry>,
    pub sequence: usize,
}
impl Default for View {
    fn default() -> Self {
        Self::new()
    }
}

impl View {
    pub fn new() -> Self {
        Self {
            width: termwidth(),
            items: Vec::new(),
            sequence: 0,
        }
    }

    pub fn push(&mut self, item: ViewItem) {
        self.items.push(ViewEntry {
            section: item.section(),
            view_item: item,
            sequence: self.sequence,
        });
        self.sequence += 1;
    }

    /// Push every chat message in `messages`.
    pub fn push_chat(&mut self, messages: &[ChatMessage]) {
        for msg in messages {
            self.push(ViewItem::Chat(msg.clone()));
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Compose and display all pending items.
    pub fn flush(&mut self) {
        if self.items.is_empty() {
            return;
        }
        // re-check terminal width in case it's been resized
        self.width = termwidth();
        self.items.sort_by_key(|entry| (entry.section, entry.sequence));

        let mut current: Option<Section> = None;
        for entry in &self.items {
            if current != Some(entry.section) {
                if let Some(label) = entry.section.label() {
                    println!("{:.>width$}\n", label.section_style(), width = self.width);
                }
                current = Some(entry.section);
            }
            Self::render(&entry.view_item);
        }

        self.items.clear();
        println!();
    }

    fn render(item: &ViewItem) {
        match item {
            ViewItem::Chat(msg) => Self::chat_line(msg),
            ViewItem::Dice(dice) => {
                let face = format!(" {} {:>2} ", ICON_DIE, dice.value);
                let verdict = if dice.is_success {
                    "success".success_style()
                } else {
                    "failure".failure_style()
                };
                println!("    {}  {verdict}\n", face.dice_style());
            },
            ViewItem::StatusBar(snapshot) => println!("{}\n", status_line(snapshot)),
            ViewItem::MiniMap(snapshot) => {
                for line in styled_map(snapshot) {
                    println!("    {line}");
                }
                println!(
                    "\n    {} you  {} start  {} boss  {} unexplored  {} dark\n",
                    "@".here_style(),
                    "S".visited_style(),
                    "B".boss_style(),
                    "?".revealed_style(),
                    "#".fog_style()
                );
            },
            ViewItem::SnapshotJson(json) => println!("{json}\n"),
            ViewItem::Help => Self::help(),
            ViewItem::EngineMessage(msg) => {
                println!("{}", fill(format!("{ICON_SYSTEM:<4}{msg}").as_str(), normal_block()));
            },
            ViewItem::Error(msg) => {
                println!(
                    "{}",
                    fill(format!("{:<4}{}", ICON_ERROR.error_style(), msg.error_style()).as_str(), normal_block())
                );
            },
            ViewItem::Farewell(snapshot) => {
                let outcome = match snapshot.game_status {
                    GameStatus::Victory => "victorious".success_style(),
                    GameStatus::GameOver => "fallen".failure_style(),
                    GameStatus::Exploration | GameStatus::Combat => "still exploring".info_style(),
                };
                println!(
                    "You leave the dungeon {outcome}, carrying {} gold. Farewell.",
                    snapshot.gold.to_string().gold_style()
                );
            },
        }
    }

    fn chat_line(msg: &ChatMessage) {
        let line = match msg.sender {
            Sender::Gm => {
                let text = match msg.tone {
                    Tone::Normal => msg.text.gm_style(),
                    Tone::Success => msg.text.success_style(),
                    Tone::Failure => msg.text.failure_style(),
                    Tone::Info => msg.text.info_style(),
                };
                format!("{:<4}{text}", ICON_GM.gm_style())
            },
            Sender::Player => format!("{:<4}{}", ICON_PLAYER.player_style(), msg.text.player_style()),
            Sender::System => format!("{:<4}{}", ICON_SYSTEM.system_style(), msg.text.system_style()),
        };
        println!("{}\n", fill(line.as_str(), normal_block()));
    }

    fn help() {
        println!("{}", "Commands".subheading_style());
        for (cmd, what) in HELP_LINES {
            println!("  {:<28}{}", cmd.prompt_style(), what);
        }
        println!();
    }
}

const HELP_LINES: [(&str, &str); 9] = [
    ("n | s | e | w", "move one room (also: go north, ...)"),
    ("attack | โจมตี", "strike the monster in front of you"),
    ("defend | ป้องกัน", "brace and recover a little HP"),
    ("flee | หลบหนี", "run from a regular monster"),
    ("map", "show the mini-map"),
    ("status", "show HP, MP, gold and location"),
    ("snapshot", "print the full game state as JSON"),
    ("reset", "abandon this run and start a new dungeon"),
    ("quit", "leave the game"),
];

/// Display order of a frame. Items inside a section keep the order they were pushed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Section {
    /// Narration and command echoes.
    Chat,
    /// Dice, status bar and map.
    Board,
    /// Help, errors and other meta output.
    System,
}
impl Section {
    fn label(self) -> Option<&'static str> {
        match self {
            Section::Chat => None,
            Section::Board => Some("board"),
            Section::System => Some("game"),
        }
    }
}

/// Wrapper for a `ViewItem` keeping its push order.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewEntry {
    pub section: Section,
    pub view_item: ViewItem,
    pub sequence: usize,
}

/// The kinds of output a frame can contain.
#[derive(Debug, Clone, PartialEq, Variantly)]
pub enum ViewItem {
    Chat(ChatMessage),
    Dice(DiceResult),
    EngineMessage(String),
    Error(String),
    Farewell(Snapshot),
    Help,
    MiniMap(Snapshot),
    SnapshotJson(String),
    StatusBar(Snapshot),
}
impl ViewItem {
    pub fn section(&self) -> Section {
        match self {
            ViewItem::Chat(_) => Section::Chat,
            ViewItem::Dice(_) | ViewItem::StatusBar(_) | ViewItem::MiniMap(_) => Section::Board,
            ViewItem::EngineMessage(_)
            | ViewItem::Error(_)
            | ViewItem::Farewell(_)
            | ViewItem::Help
            | ViewItem::SnapshotJson(_) => Section::System,
        }
    }
}

/// What a mini-map cell shows under fog of war.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MapCell {
    Here,
    Dark,
    Unexplored,
    Visited(RoomKind),
}
impl MapCell {
    pub fn glyph(self) -> char {
        match self {
            MapCell::Here => '@',
            MapCell::Dark => '#',
            MapCell::Unexplored => '?',
            MapCell::Visited(RoomKind::Start) => 'S',
            MapCell::Visited(RoomKind::Boss) => 'B',
            MapCell::Visited(_) => '.',
        }
    }
}

/// Classify every cell of the snapshot's grid, row by row.
///
/// Room kinds stay hidden until the room has been visited.
pub fn map_cells(snapshot: &Snapshot) -> Vec<Vec<MapCell>> {
    snapshot
        .grid
        .iter()
        .enumerate()
        .map(|(y, row)| {
            row.iter()
                .enumerate()
                .map(|(x, room)| {
                    if Position::new(x, y) == snapshot.player_position {
                        MapCell::Here
                    } else if room.visited() {
                        MapCell::Visited(room.kind)
                    } else if room.revealed() {
                        MapCell::Unexplored
                    } else {
                        MapCell::Dark
                    }
                })
                .collect()
        })
        .collect()
}

/// Plain-text mini-map, one string per row.
pub fn render_map(snapshot: &Snapshot) -> Vec<String> {
    map_cells(snapshot)
        .iter()
        .map(|row| row.iter().map(|cell| cell.glyph().to_string()).collect::<Vec<_>>().join(" "))
        .collect()
}

fn styled_map(snapshot: &Snapshot) -> Vec<String> {
    map_cells(snapshot)
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| {
                    let glyph = cell.glyph().to_string();
                    match cell {
                        MapCell::Here => glyph.here_style().to_string(),
                        MapCell::Dark => glyph.fog_style().to_string(),
                        MapCell::Unexplored => glyph.revealed_style().to_string(),
                        MapCell::Visited(RoomKind::Boss) => glyph.boss_style().to_string(),
                        MapCell::Visited(_) => glyph.visited_style().to_string(),
                    }
                })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

/// One-line summary of the player's resources, location and any boss fight.
pub fn status_line(snapshot: &Snapshot) -> String {
    let mut line = format!(
        "{} {}/{}  {} {}/{}  {} {}  floor {}  {} {}",
        "HP".hp_style(),
        snapshot.hp,
        snapshot.max_hp,
        "MP".mp_style(),
        snapshot.mp,
        snapshot.max_mp,
        "Gold".gold_style(),
        snapshot.gold,
        snapshot.floor_level,
        snapshot.current_kind(),
        snapshot.player_position,
    );
    if snapshot.current_kind() == RoomKind::Boss && snapshot.game_status == GameStatus::Combat {
        line.push_str(&format!(
            "  {} {}/{}",
            "Boss".boss_style(),
            snapshot.boss_hp,
            snapshot.max_boss_hp
        ));
    }
    line
}
