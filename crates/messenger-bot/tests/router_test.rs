//! Command routing through the full handler set.

mod common;

use common::{Harness, BOT_ID, THREAD};
use messenger_bot::commands::{INVISIBLE_TAG, PALETTE};
use messenger_client::IncomingMessage;

fn msg(sender: &str, body: &str) -> IncomingMessage {
    IncomingMessage::new(THREAD, sender, body)
}

async fn reply(h: &Harness, message: IncomingMessage) -> String {
    h.router.respond(&message).await.unwrap().body
}

#[tokio::test]
async fn test_unknown_command_fallback() {
    let h = Harness::new();

    let body = reply(&h, msg("alice", "abracadabra")).await;

    assert_eq!(body, "Unknown command. Type 'help' to see the list of commands.");
}

#[tokio::test]
async fn test_hello_and_case_insensitive_key() {
    let h = Harness::new();

    let body = reply(&h, msg("alice", "HELLO")).await;

    assert!(body.starts_with("Hi there!"));
}

#[tokio::test]
async fn test_help_lists_commands() {
    let h = Harness::new();

    let body = reply(&h, msg("alice", "help")).await;

    assert!(body.starts_with("Here is what I can do:"));
    assert!(body.contains("- kick: Remove a member from the group"));
    assert!(body.contains("  Usage: kick @user"));
    assert!(body.contains(".ping"));
    assert!(!body.contains("- unknown"));
}

#[tokio::test]
async fn test_time_format() {
    let h = Harness::new();

    let body = reply(&h, msg("alice", "time")).await;
    let stamp = body.trim_start_matches("Current time: ");

    assert!(chrono::NaiveDateTime::parse_from_str(stamp, "%H:%M:%S %d/%m/%Y").is_ok());
}

#[tokio::test]
async fn test_kick_tagged_user() {
    let h = Harness::new();

    let body = reply(&h, msg("alice", "kick @Bob").with_mention("bob", "Bob")).await;

    assert_eq!(body, "Bob has been removed from the group.");
    assert_eq!(h.chat.removed(), vec![(THREAD.to_string(), "bob".to_string())]);
}

#[tokio::test]
async fn test_kick_without_tag_shows_usage() {
    let h = Harness::new();

    let body = reply(&h, msg("alice", "kick")).await;

    assert_eq!(body, "kick @user");
    assert!(h.chat.removed().is_empty());
}

#[tokio::test]
async fn test_kick_failure_reports_error() {
    let h = Harness::new();
    h.chat.fail_remove();

    let body = reply(&h, msg("alice", "kick @Bob").with_mention("bob", "Bob")).await;

    assert!(body.starts_with("Could not kick Bob."));
    assert!(body.contains("not allowed"));
}

#[tokio::test]
async fn test_ban_twice_stores_once() {
    let h = Harness::new();
    let ban = msg("admin", "ban @Bob").with_mention("bob", "Bob");

    assert_eq!(reply(&h, ban.clone()).await, "Bob has been banned from the group.");
    reply(&h, ban).await;

    assert_eq!(h.stores.bans.list(THREAD).await.unwrap(), vec!["bob"]);
    assert_eq!(h.chat.removed().len(), 2);
}

#[tokio::test]
async fn test_ban_is_recorded_even_if_removal_fails() {
    let h = Harness::new();
    h.chat.fail_remove();

    let body = reply(&h, msg("admin", "ban @Bob").with_mention("bob", "Bob")).await;

    assert!(body.contains("could not be removed"));
    assert!(h.stores.bans.contains(THREAD, "bob").await.unwrap());
}

#[tokio::test]
async fn test_unban() {
    let h = Harness::new();
    h.stores.bans.add(THREAD, "12345").await.unwrap();

    let body = reply(&h, msg("admin", "unban 12345")).await;

    assert_eq!(body, "User 12345 has been unbanned.");
    assert!(!h.stores.bans.contains(THREAD, "12345").await.unwrap());
}

#[tokio::test]
async fn test_unban_not_banned_leaves_store_unchanged() {
    let h = Harness::new();
    h.stores.bans.add(THREAD, "other").await.unwrap();

    let body = reply(&h, msg("admin", "unban 999")).await;

    assert_eq!(body, "User 999 is not banned.");
    assert_eq!(h.stores.bans.list(THREAD).await.unwrap(), vec!["other"]);
}

#[tokio::test]
async fn test_unban_without_id_shows_usage() {
    let h = Harness::new();

    assert_eq!(reply(&h, msg("admin", "unban")).await, "unban <userID>");
}

#[tokio::test]
async fn test_mute_silences_sender() {
    let h = Harness::new();

    let body = reply(&h, msg("admin", "mute @Bob").with_mention("bob", "Bob")).await;
    assert!(body.starts_with("Bob has been muted."));

    assert!(h.router.respond(&msg("bob", "hello")).await.is_none());
    assert!(h.router.respond(&msg("alice", "hello")).await.is_some());
}

#[tokio::test]
async fn test_unmute() {
    let h = Harness::new();
    let unmute = msg("admin", "unmute @Bob").with_mention("bob", "Bob");

    assert_eq!(reply(&h, unmute.clone()).await, "Bob is not muted.");

    h.stores.mutes.add(THREAD, "bob").await.unwrap();
    assert_eq!(reply(&h, unmute).await, "Bob has been unmuted.");
    assert!(h.router.respond(&msg("bob", "hello")).await.is_some());
}

#[tokio::test]
async fn test_setbd_tagged_user() {
    let h = Harness::new();

    let body = reply(
        &h,
        msg("alice", "setbd @Bob Smith Captain Bob").with_mention("bob", "Bob Smith"),
    )
    .await;

    assert_eq!(body, "Changed the nickname of Bob Smith to Captain Bob.");
    assert_eq!(
        h.chat.nicknames(),
        vec![(THREAD.to_string(), "bob".to_string(), "Captain Bob".to_string())]
    );
}

#[tokio::test]
async fn test_setbd_falls_back_to_sender() {
    let h = Harness::new();

    let body = reply(&h, msg("alice", "setbd The Great")).await;

    assert_eq!(body, "Changed the nickname of you to The Great.");
    assert_eq!(h.chat.nicknames()[0].1, "alice");
}

#[tokio::test]
async fn test_setbd_without_nickname_shows_usage() {
    let h = Harness::new();

    assert_eq!(reply(&h, msg("alice", "setbd")).await, "setbd [@user] <nickname>");
    assert!(h.chat.nicknames().is_empty());
}

#[tokio::test]
async fn test_game_id_round_trip() {
    let h = Harness::new();

    let body = reply(&h, msg("alice", ".setidgame Player#42")).await;
    assert_eq!(body, "Saved game ID Player#42 for you.");

    let body = reply(&h, msg("bob", ".id @Alice").with_mention("alice", "Alice")).await;
    assert_eq!(body, "Game ID of Alice: Player#42");
}

#[tokio::test]
async fn test_game_id_with_self_marker() {
    let h = Harness::new();

    reply(&h, msg("alice", ".setidgame @me Hero")).await;

    assert_eq!(
        h.stores.game_ids.get(THREAD, "alice").await.unwrap().as_deref(),
        Some("Hero")
    );
}

#[tokio::test]
async fn test_game_id_for_tag_missing_from_body_uses_rest() {
    let h = Harness::new();

    let body = reply(&h, msg("alice", ".setidgame ABC123").with_mention("bob", "Bob")).await;

    assert_eq!(body, "Saved game ID ABC123 for Bob.");
    assert_eq!(
        h.stores.game_ids.get(THREAD, "bob").await.unwrap().as_deref(),
        Some("ABC123")
    );
}

#[tokio::test]
async fn test_game_id_not_found() {
    let h = Harness::new();

    assert_eq!(reply(&h, msg("alice", ".id")).await, "No game ID found for you.");
}

#[tokio::test]
async fn test_ping_mentions_everyone_but_bot() {
    let h = Harness::new();

    let message = h
        .router
        .respond(&msg("alice", ".ping meeting at 8"))
        .await
        .unwrap();

    // Participants: bot, admin, alice, bob.
    assert_eq!(message.mentions.len(), 3);
    assert!(message.mentions.iter().all(|m| m.id != BOT_ID));
    assert!(message.body.ends_with("meeting at 8"));

    let chars: Vec<char> = message.body.chars().collect();
    let mut indexes: Vec<usize> = message.mentions.iter().map(|m| m.from_index).collect();
    indexes.dedup();
    assert_eq!(indexes.len(), 3);
    for index in indexes {
        assert_eq!(chars[index].to_string(), INVISIBLE_TAG);
    }
}

#[tokio::test]
async fn test_ping_without_text_shows_usage() {
    let h = Harness::new();

    assert_eq!(reply(&h, msg("alice", ".ping")).await, ".ping <message>");
}

#[tokio::test]
async fn test_color_picks_from_palette() {
    let h = Harness::new();

    let body = reply(&h, msg("alice", ".color")).await;

    let colors = h.chat.colors();
    assert_eq!(colors.len(), 1);
    assert!(PALETTE.contains(&colors[0].1.as_str()));
    assert_eq!(body, format!("Thread color changed to {}.", colors[0].1));
}

#[tokio::test]
async fn test_admin_mode_restricts_moderation() {
    let h = Harness::new();

    assert_eq!(reply(&h, msg("alice", ".admin")).await, "Admin mode is now on.");

    let body = reply(&h, msg("alice", "kick @Bob").with_mention("bob", "Bob")).await;
    assert_eq!(body, "This command is for group admins only while admin mode is on.");
    assert!(h.chat.removed().is_empty());

    let body = reply(&h, msg("admin", "kick @Bob").with_mention("bob", "Bob")).await;
    assert_eq!(body, "Bob has been removed from the group.");

    // Non-restricted commands stay open.
    assert!(reply(&h, msg("alice", "hello")).await.starts_with("Hi there!"));

    assert_eq!(reply(&h, msg("alice", ".admin")).await, "Admin mode is now off.");
    reply(&h, msg("alice", "kick @Bob").with_mention("bob", "Bob")).await;
    assert_eq!(h.chat.removed().len(), 2);
}

#[tokio::test]
async fn test_admin_lookup_is_cached_until_toggle() {
    let h = Harness::new();
    let kick = msg("admin", "kick @Bob").with_mention("bob", "Bob");

    h.state.toggle_admin_mode(THREAD).await;
    reply(&h, kick.clone()).await;
    reply(&h, kick.clone()).await;
    assert_eq!(h.chat.thread_info_calls(), 1);

    // Off and on again drops the cache.
    h.state.toggle_admin_mode(THREAD).await;
    h.state.toggle_admin_mode(THREAD).await;
    reply(&h, kick).await;
    assert_eq!(h.chat.thread_info_calls(), 2);
}

#[tokio::test]
async fn test_failed_admin_lookup_blocks_command() {
    let h = Harness::new();
    h.chat.fail_thread_info();
    h.state.toggle_admin_mode(THREAD).await;

    let body = reply(&h, msg("admin", "ban @Bob").with_mention("bob", "Bob")).await;

    assert!(body.contains("thread unavailable"));
    assert!(h.chat.removed().is_empty());
    assert!(h.stores.bans.list(THREAD).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_handle_sends_to_thread() {
    let h = Harness::new();

    h.router.handle(&msg("alice", "hello")).await.unwrap();

    let sent = h.chat.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].thread_id, THREAD);
}

#[tokio::test]
async fn test_bot_ignores_itself() {
    let h = Harness::new();

    h.router.handle(&msg(BOT_ID, "hello")).await.unwrap();

    assert!(h.chat.sent().is_empty());
}
