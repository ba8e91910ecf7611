use std::io;

use bug_crossing::compute::new_player;
use bug_crossing::entities::*;
use bug_crossing::overlay::{Align, CachedOverlay, OverlayBuffer, OverlayLine, Tone};
use bug_crossing::resources::SpriteKey;
use bug_crossing::scene::{Scene, Surface, RESTART_PROMPT, SCORE_X, SCORE_Y};

#[derive(Debug, PartialEq)]
enum Call {
    Begin,
    Sprite(SpriteKey, f32, f32),
    Overlay(Vec<String>, f32, f32),
    Present,
}

#[derive(Default)]
struct Recorder {
    calls: Vec<Call>,
}

impl Surface for Recorder {
    fn begin_frame(&mut self) -> io::Result<()> {
        self.calls.push(Call::Begin);
        Ok(())
    }

    fn draw_sprite(&mut self, key: SpriteKey, x: f32, y: f32) -> io::Result<()> {
        self.calls.push(Call::Sprite(key, x, y));
        Ok(())
    }

    fn blit_overlay(&mut self, overlay: &OverlayBuffer, x: f32, y: f32) -> io::Result<()> {
        let texts = overlay.lines.iter().map(|l| l.text.clone()).collect();
        self.calls.push(Call::Overlay(texts, x, y));
        Ok(())
    }

    fn present(&mut self) -> io::Result<()> {
        self.calls.push(Call::Present);
        Ok(())
    }
}

fn make_state() -> GameState {
    GameState {
        player: new_player(),
        enemies: vec![
            Enemy { x: 10.0, y: 58.0, row: 1, speed: 100.0 },
            Enemy { x: -50.0, y: 224.0, row: 3, speed: 200.0 },
        ],
        score: 7,
        high_score: 53,
        status: GameStatus::Running,
        result_dirty: false,
        elapsed: 0.0,
        frame: 0,
    }
}

fn render(scene: &mut Scene, state: &GameState) -> Vec<Call> {
    let mut rec = Recorder::default();
    scene.render(state, &mut rec).unwrap();
    rec.calls
}

fn overlay_texts(calls: &[Call]) -> Vec<Vec<String>> {
    calls
        .iter()
        .filter_map(|c| match c {
            Call::Overlay(texts, _, _) => Some(texts.clone()),
            _ => None,
        })
        .collect()
}

// ── Draw order ────────────────────────────────────────────────────────────────

#[test]
fn running_frame_draws_in_fixed_order() {
    let mut scene = Scene::new();
    let calls = render(&mut scene, &make_state());

    assert_eq!(calls.first(), Some(&Call::Begin));
    assert_eq!(calls.last(), Some(&Call::Present));

    // 6 rows × 5 columns of tiles, top row is water.
    let tiles: Vec<_> = calls[1..31].iter().collect();
    assert_eq!(tiles[0], &Call::Sprite(SpriteKey::WaterBlock, 0.0, 0.0));
    assert_eq!(tiles[5], &Call::Sprite(SpriteKey::StoneBlock, 0.0, 83.0));
    assert_eq!(tiles[29], &Call::Sprite(SpriteKey::GrassBlock, 404.0, 415.0));

    assert!(matches!(&calls[31], Call::Overlay(_, x, y) if *x == 0.0 && *y == 0.0));
    assert!(matches!(&calls[32], Call::Overlay(_, x, y) if *x == SCORE_X && *y == SCORE_Y));
    assert_eq!(calls[33], Call::Sprite(SpriteKey::EnemyBug, 10.0, 58.0));
    assert_eq!(calls[34], Call::Sprite(SpriteKey::EnemyBug, -50.0, 224.0));
    assert_eq!(calls[35], Call::Sprite(SpriteKey::CharBoy, 202.0, 390.0));
    assert_eq!(calls.len(), 37);
}

#[test]
fn scoreboard_shows_high_and_current_score() {
    let mut scene = Scene::new();
    let texts = overlay_texts(&render(&mut scene, &make_state()));
    assert_eq!(texts[0], vec!["High:  53".to_string(), "Score:".to_string()]);
    assert_eq!(texts[1], vec!["7".to_string()]);
}

#[test]
fn result_overlay_only_while_showing_result() {
    let mut scene = Scene::new();
    let mut s = make_state();
    assert_eq!(overlay_texts(&render(&mut scene, &s)).len(), 2);

    s.status = GameStatus::ShowResult;
    s.player.lost_game = true;
    s.result_dirty = true;
    let calls = render(&mut scene, &s);
    let texts = overlay_texts(&calls);
    assert_eq!(texts.len(), 3);
    assert_eq!(texts[2], vec!["Smushed!".to_string(), RESTART_PROMPT.to_string()]);
    // Drawn after every entity, right before the frame is presented.
    assert!(matches!(calls[calls.len() - 2], Call::Overlay(..)));
}

#[test]
fn result_banner_reports_new_high_score() {
    let mut scene = Scene::new();
    let mut s = make_state();
    s.score = 80;
    s.status = GameStatus::ShowResult;
    s.player.won_game = true;
    s.result_dirty = true;
    let texts = overlay_texts(&render(&mut scene, &s));
    assert_eq!(texts[2][0], "NEW HIGH SCORE:  80");
}

#[test]
fn result_banner_for_crossing_without_record() {
    let mut scene = Scene::new();
    let mut s = make_state();
    s.score = 51;
    s.status = GameStatus::ShowResult;
    s.player.won_game = true;
    s.result_dirty = true;
    let texts = overlay_texts(&render(&mut scene, &s));
    assert_eq!(texts[2][0], "You Made It!");
}

// ── Overlay caching ───────────────────────────────────────────────────────────

#[test]
fn overlays_only_relaid_when_value_changes() {
    let mut scene = Scene::new();
    let mut s = make_state();
    render(&mut scene, &s);
    render(&mut scene, &s);
    assert_eq!(scene.redraw_counts(), (1, 1, 0));

    s.score += 1;
    render(&mut scene, &s);
    assert_eq!(scene.redraw_counts(), (1, 2, 0));

    s.high_score = 90;
    render(&mut scene, &s);
    assert_eq!(scene.redraw_counts(), (2, 2, 0));
}

#[test]
fn result_overlay_forced_on_each_transition() {
    let mut scene = Scene::new();
    let mut s = make_state();
    s.status = GameStatus::ShowResult;
    s.player.lost_game = true;
    s.result_dirty = true;
    render(&mut scene, &s);

    s.result_dirty = false;
    render(&mut scene, &s);
    assert_eq!(scene.redraw_counts().2, 1);

    // Same message, new game over: still laid out again.
    s.result_dirty = true;
    render(&mut scene, &s);
    assert_eq!(scene.redraw_counts().2, 2);
}

fn line(text: &str) -> Vec<OverlayLine> {
    vec![OverlayLine {
        text: text.to_string(),
        x: 0.0,
        y: 0.0,
        align: Align::Left,
        tone: Tone::Board,
    }]
}

#[test]
fn cached_overlay_lays_out_once_per_key() {
    let mut overlay: CachedOverlay<u32> = CachedOverlay::new(80.0, 40.0, false);
    overlay.refresh(&3, |k| line(&k.to_string()));
    overlay.refresh(&3, |_| panic!("should be cached"));
    assert_eq!(overlay.redraws(), 1);

    let buf = overlay.refresh(&4, |k| line(&k.to_string()));
    assert_eq!(buf.lines[0].text, "4");
    assert_eq!(overlay.redraws(), 2);
}

#[test]
fn cached_overlay_forced_redraw_ignores_cache() {
    let mut overlay: CachedOverlay<u32> = CachedOverlay::new(80.0, 40.0, false);
    overlay.refresh(&1, |k| line(&k.to_string()));
    overlay.force_redraw();
    assert!(overlay.needs_redraw(&1));
    overlay.refresh(&1, |k| line(&k.to_string()));
    assert_eq!(overlay.redraws(), 2);
    assert!(!overlay.needs_redraw(&1));
}
