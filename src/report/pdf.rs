// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use printpdf::{
    BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
};
use std::fs;
use std::path::Path;

use super::{Block, Column, REPORT_TITLE};
use crate::error::{AppError, AppResult};
use crate::utils::truncate;

const PAGE_W: f32 = 210.0;
const PAGE_H: f32 = 297.0;
const MARGIN: f32 = 18.0;
const LINE: f32 = 6.0;

fn pdf_err<E: std::fmt::Debug>(e: E) -> AppError {
    AppError::Pdf(format!("{:?}", e))
}

/// Top-to-bottom text cursor over A4 pages.
struct PageWriter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    y: f32,
    pages: usize,
}

impl PageWriter {
    fn new(title: &str) -> AppResult<Self> {
        let (doc, page, layer) = PdfDocument::new(title, Mm(PAGE_W), Mm(PAGE_H), "Camada 1");
        let regular = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_err)?;
        let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold).map_err(pdf_err)?;
        let layer = doc.get_page(page).get_layer(layer);
        Ok(Self {
            doc,
            layer,
            regular,
            bold,
            y: PAGE_H - MARGIN,
            pages: 1,
        })
    }

    fn ensure_room(&mut self, height: f32) {
        if self.y - height < MARGIN {
            let (page, layer) = self.doc.add_page(Mm(PAGE_W), Mm(PAGE_H), "Camada 1");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = PAGE_H - MARGIN;
            self.pages += 1;
        }
    }

    fn text_at(&self, text: &str, size: f32, x: f32, bold: bool) {
        let font = if bold { &self.bold } else { &self.regular };
        self.layer.use_text(text, size, Mm(x), Mm(self.y), font);
    }

    fn line(&mut self, text: &str, size: f32, bold: bool) {
        let height = size * 0.5;
        self.ensure_room(height);
        self.y -= height;
        self.text_at(text, size, MARGIN, bold);
        self.y -= 2.0;
    }

    fn row(&mut self, cells: &[String], columns: &[Column], bold: bool) {
        self.ensure_room(LINE);
        self.y -= LINE;
        let mut x = MARGIN;
        for (cell, column) in cells.iter().zip(columns) {
            self.text_at(&truncate(cell, column.max_chars), 10.0, x, bold);
            x += column.width;
        }
    }

    fn table(&mut self, heading: &str, columns: &[Column], rows: &[Vec<String>]) {
        // keep the heading together with the header row
        self.ensure_room(LINE * 3.0);
        self.y -= 4.0;
        self.line(heading, 13.0, true);
        let headers: Vec<String> = columns.iter().map(|c| c.header.clone()).collect();
        self.row(&headers, columns, true);
        if rows.is_empty() {
            self.ensure_room(LINE);
            self.y -= LINE;
            self.text_at("Nenhum registro no período", 10.0, MARGIN, false);
            return;
        }
        for r in rows {
            self.row(r, columns, false);
        }
    }

    fn finish(self) -> AppResult<(Vec<u8>, usize)> {
        let pages = self.pages;
        let bytes = self.doc.save_to_bytes().map_err(pdf_err)?;
        Ok((bytes, pages))
    }
}

/// Renders the blocks into PDF bytes; returns the bytes and the page count.
pub fn render(blocks: &[Block]) -> AppResult<(Vec<u8>, usize)> {
    let mut w = PageWriter::new(REPORT_TITLE)?;
    for block in blocks {
        match block {
            Block::Title(t) => w.line(t, 20.0, true),
            Block::Text(t) => w.line(t, 11.0, false),
            Block::Table {
                heading,
                columns,
                rows,
            } => w.table(heading, columns, rows),
        }
    }
    w.finish()
}

pub fn write_pdf(blocks: &[Block], path: &Path) -> AppResult<usize> {
    let (bytes, pages) = render(blocks)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, bytes)?;
    tracing::info!(path = %path.display(), pages, "report written");
    Ok(pages)
}
