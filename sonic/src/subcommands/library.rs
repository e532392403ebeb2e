use super::Session;
use clap::Args;
use sonic_common::models::{Entry, SearchCriteria};

#[derive(Args, Debug)]
pub struct IndexesSubcommand {
    /// Restrict the index to one music folder
    #[clap(short, long)]
    folder: Option<String>,
}

#[derive(Args, Debug)]
pub struct SearchSubcommand {
    query: String,

    #[clap(long, default_value_t = 20)]
    artists: usize,

    #[clap(long, default_value_t = 20)]
    albums: usize,

    #[clap(long, default_value_t = 25)]
    songs: usize,
}

fn print_song(song: &Entry) {
    println!(
        "{}\t{}\t{}",
        song.id,
        song.artist.as_deref().unwrap_or("-"),
        song.title
    );
}

pub(super) async fn folders(session: &Session) -> anyhow::Result<()> {
    for folder in session.service().music_folders(session.refresh()).await? {
        println!("{}\t{}", folder.id, folder.name);
    }
    Ok(())
}

pub(super) async fn indexes(me: IndexesSubcommand, session: &Session) -> anyhow::Result<()> {
    let indexes = session
        .service()
        .indexes(me.folder.as_deref(), session.refresh())
        .await?;
    for artist in indexes.shortcuts.iter() {
        println!("{}\t{}\t(shortcut)", artist.id, artist.name);
    }
    for index in indexes.indexes.iter() {
        println!("[{}]", index.name);
        for artist in index.artists.iter() {
            println!("{}\t{}", artist.id, artist.name);
        }
    }
    Ok(())
}

pub(super) async fn directory(id: &str, session: &Session) -> anyhow::Result<()> {
    let directory = session
        .service()
        .music_directory(id, session.refresh())
        .await?;
    println!("# {}", directory.name);
    for dir in directory.dirs() {
        println!("{}\t{}/", dir.id, dir.title);
    }
    for song in directory.songs() {
        print_song(song);
    }
    Ok(())
}

pub(super) async fn album(id: &str, session: &Session) -> anyhow::Result<()> {
    let album = session.service().album(id, session.refresh()).await?;
    match album.artist.as_deref() {
        Some(artist) => println!("# {} - {}", artist, album.name),
        None => println!("# {}", album.name),
    }
    for song in album.songs.iter() {
        print_song(song);
    }
    Ok(())
}

pub(super) async fn search(me: SearchSubcommand, session: &Session) -> anyhow::Result<()> {
    let criteria = SearchCriteria {
        query: me.query,
        artist_count: me.artists,
        album_count: me.albums,
        song_count: me.songs,
    };
    let result = session.service().search(&criteria).await?;
    if result.is_empty() {
        log::info!("Nothing matches {:?}", criteria.query);
        return Ok(());
    }

    for artist in result.artists.iter() {
        println!("artist\t{}\t{}", artist.id, artist.name);
    }
    for album in result.albums.iter() {
        println!("album\t{}\t{}", album.id, album.name);
    }
    for song in result.songs.iter() {
        print!("song\t");
        print_song(song);
    }
    Ok(())
}

pub(super) async fn playlists(session: &Session) -> anyhow::Result<()> {
    for playlist in session.service().playlists(session.refresh()).await? {
        println!(
            "{}\t{}\t{} songs",
            playlist.id, playlist.name, playlist.song_count
        );
    }
    Ok(())
}

pub(super) async fn playlist(id: &str, session: &Session) -> anyhow::Result<()> {
    let playlist = session.service().playlist(id).await?;
    println!("# {}", playlist.name);
    for song in playlist.entries.iter() {
        print_song(song);
    }
    Ok(())
}

pub(super) async fn genres(session: &Session) -> anyhow::Result<()> {
    for genre in session.service().genres(session.refresh()).await? {
        println!(
            "{}\t{} albums\t{} songs",
            genre.name, genre.album_count, genre.song_count
        );
    }
    Ok(())
}

pub(super) fn stream(
    id: &str,
    max_bit_rate: Option<u32>,
    session: &Session,
) -> anyhow::Result<()> {
    println!("{}", session.service().stream_url(id, max_bit_rate)?);
    Ok(())
}

pub(super) fn cover(id: &str, size: Option<u32>, session: &Session) -> anyhow::Result<()> {
    println!("{}", session.service().cover_art_url(id, size)?);
    Ok(())
}
