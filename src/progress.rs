// SPDX-License-Identifier: MIT
//
// Copyright (c) 2025 Alexandre Severino
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

/// Receiver of coarse progress events from long stages.
///
/// `percent` is `None` when the stage cannot estimate its completion.
pub trait Progress {
    fn report(&mut self, message: &str, percent: Option<f64>);
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl Progress for Silent {
    fn report(&mut self, _message: &str, _percent: Option<f64>) {}
}

impl<F> Progress for F
where
    F: FnMut(&str, Option<f64>),
{
    fn report(&mut self, message: &str, percent: Option<f64>) {
        self(message, percent)
    }
}

/// Keeps every event, for inspection in tests and logs.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    pub events: Vec<(String, Option<f64>)>,
}

impl Progress for Recorder {
    fn report(&mut self, message: &str, percent: Option<f64>) {
        self.events.push((message.to_owned(), percent));
    }
}
