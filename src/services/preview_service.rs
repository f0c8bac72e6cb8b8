// src/services/preview_service.rs

use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;
use std::path::Path;
use std::sync::mpsc::{Receiver, Sender, channel};

use eframe::egui;

use crate::app_logic::draft::ImageRef;

const MAX_PREVIEW_CACHE_SIZE: usize = 48;

/// Decoded pixels ready to become a texture on the UI thread.
pub struct LoadedPreview {
    pub size: [usize; 2],
    pub rgba: Vec<u8>,
}

/// Texture cache for the thumbnails shown in the list cards and the
/// form's image strip. Local files decode synchronously; remote URLs
/// are fetched on a worker thread and delivered over the channel.
/// Failed keys are remembered so a broken URL is not refetched every
/// frame.
pub struct PreviewService {
    textures: HashMap<String, egui::TextureHandle>,
    order: VecDeque<String>,
    pending: HashSet<String>,
    failed: HashSet<String>,
    tx: Sender<(String, Result<LoadedPreview, String>)>,
    rx: Receiver<(String, Result<LoadedPreview, String>)>,
    http: reqwest::blocking::Client,
}

impl PreviewService {
    pub fn new() -> Self {
        let (tx, rx) = channel();
        Self {
            textures: HashMap::new(),
            order: VecDeque::with_capacity(MAX_PREVIEW_CACHE_SIZE),
            pending: HashSet::new(),
            failed: HashSet::new(),
            tx,
            rx,
            http: reqwest::blocking::Client::new(),
        }
    }

    /// Drains finished remote fetches into textures. Called once per
    /// frame before the views render.
    pub fn poll(&mut self, ctx: &egui::Context) {
        while let Ok((key, result)) = self.rx.try_recv() {
            self.pending.remove(&key);
            match result {
                Ok(preview) => {
                    let color_image =
                        egui::ColorImage::from_rgba_unmultiplied(preview.size, &preview.rgba);
                    let handle =
                        ctx.load_texture(key.clone(), color_image, egui::TextureOptions::LINEAR);
                    self.insert(key, handle);
                }
                Err(err) => {
                    log::warn!("Preview load failed for '{}': {}", key, err);
                    self.failed.insert(key);
                }
            }
            ctx.request_repaint();
        }
    }

    /// Returns the cached texture for an image, kicking off a load when
    /// it is not cached yet. Remote loads return None until the fetch
    /// lands.
    pub fn texture_for(&mut self, ctx: &egui::Context, image: &ImageRef) -> Option<egui::TextureHandle> {
        let key = image.cache_key();
        if self.textures.contains_key(&key) {
            self.touch(&key);
            return self.textures.get(&key).cloned();
        }
        if self.failed.contains(&key) {
            return None;
        }
        match image {
            ImageRef::Local(path) => match load_local_preview(path) {
                Ok(preview) => {
                    let color_image =
                        egui::ColorImage::from_rgba_unmultiplied(preview.size, &preview.rgba);
                    let handle =
                        ctx.load_texture(key.clone(), color_image, egui::TextureOptions::LINEAR);
                    self.insert(key, handle.clone());
                    Some(handle)
                }
                Err(err) => {
                    log::warn!("Failed to load preview '{}': {}", path.display(), err);
                    self.failed.insert(key);
                    None
                }
            },
            ImageRef::Remote(url) => {
                self.spawn_remote_fetch(ctx, key, url.clone());
                None
            }
        }
    }

    fn spawn_remote_fetch(&mut self, ctx: &egui::Context, key: String, url: String) {
        if self.pending.contains(&key) {
            return;
        }
        self.pending.insert(key.clone());

        let tx = self.tx.clone();
        let http = self.http.clone();
        let ctx = ctx.clone();
        std::thread::spawn(move || {
            let result = fetch_remote_preview(&http, &url);
            if let Err(err) = tx.send((key, result)) {
                log::error!("Failed to deliver preview for '{}': {}", url, err);
            }
            ctx.request_repaint();
        });
    }

    fn insert(&mut self, key: String, handle: egui::TextureHandle) {
        self.textures.insert(key.clone(), handle);
        self.order.push_front(key);
        self.prune();
    }

    fn touch(&mut self, key: &str) {
        if let Some(index) = self.order.iter().position(|k| k == key) {
            if let Some(existing) = self.order.remove(index) {
                self.order.push_front(existing);
            }
        }
    }

    fn prune(&mut self) {
        while self.order.len() > MAX_PREVIEW_CACHE_SIZE {
            match self.order.pop_back() {
                Some(oldest) => {
                    self.textures.remove(&oldest);
                }
                None => break,
            }
        }
    }
}

impl fmt::Debug for PreviewService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreviewService")
            .field("textures_count", &self.textures.len())
            .field("pending_count", &self.pending.len())
            .field("failed_count", &self.failed.len())
            .finish()
    }
}

fn fetch_remote_preview(http: &reqwest::blocking::Client, url: &str) -> Result<LoadedPreview, String> {
    let bytes = http
        .get(url)
        .send()
        .and_then(|response| response.error_for_status())
        .and_then(|response| response.bytes())
        .map_err(|e| e.to_string())?;
    decode_preview(&bytes)
}

fn load_local_preview(path: &Path) -> Result<LoadedPreview, String> {
    let img = image::open(path).map_err(|e| e.to_string())?;
    Ok(LoadedPreview {
        size: [img.width() as usize, img.height() as usize],
        rgba: img.to_rgba8().into_raw(),
    })
}

fn decode_preview(bytes: &[u8]) -> Result<LoadedPreview, String> {
    let img = image::load_from_memory(bytes).map_err(|e| e.to_string())?;
    Ok(LoadedPreview {
        size: [img.width() as usize, img.height() as usize],
        rgba: img.to_rgba8().into_raw(),
    })
}
