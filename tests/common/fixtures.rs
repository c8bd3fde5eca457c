//! On-disk Go projects for integration tests.
#![allow(dead_code)]

use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Builder for a throwaway Go module in a temp directory.
pub struct GoProject {
    dir: TempDir,
}

impl GoProject {
    pub fn new(module: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let project = Self { dir };
        project.write("go.mod", &format!("module {}\n\ngo 1.21\n", module))
    }

    pub fn write(self, rel: &str, body: &str) -> Self {
        let path = self.dir.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create package dir");
        }
        fs::write(&path, body).expect("write go file");
        self
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

/// UserService holds a repository and builds a cache through `cache.NewCache()`.
pub fn user_service_project() -> GoProject {
    GoProject::new("github.com/acme/users")
        .write(
            "service/user_service.go",
            r#"package service

import "github.com/acme/users/cache"

type UserService struct {
	repo *UserRepository
	name string
}

func (s *UserService) Warm() {
	c := cache.NewCache()
	_ = c
}
"#,
        )
        .write(
            "service/user_repository.go",
            r#"package service

type UserRepository struct {
	dsn string
}
"#,
        )
        .write(
            "cache/cache.go",
            r#"package cache

type Cache struct {
	size int
}

func NewCache() *Cache {
	return &Cache{}
}
"#,
        )
}

/// A -> B -> C -> A through pointer fields.
pub fn ring_project() -> GoProject {
    GoProject::new("example.com/ring").write(
        "ring/ring.go",
        r#"package ring

type A struct {
	b *B
}

type B struct {
	c *C
}

type C struct {
	a *A
}
"#,
    )
}

/// A store whose fields cover every exclusion rule next to one real dependency.
pub fn exclusion_project() -> GoProject {
    GoProject::new("example.com/store").write(
        "store/store.go",
        r#"package store

import (
	"context"
	"time"
)

type Store struct {
	created time.Time
	ctx     context.Context
	name    string
	byID    map[string]*User
	orders  []*Order
	log     *Logger
	aux     *helper
}

type User struct {
	ID string
}

type Order struct {
	ID string
}

type Logger struct {
	level int
}

type helper struct {
	n int
}
"#,
    )
}

/// A layered app: service -> repository -> model, with a cache and an interface.
pub fn layered_project() -> GoProject {
    GoProject::new("github.com/acme/shop")
        .write(
            "model/order.go",
            r#"package model

type Order struct {
	ID    string
	Items []Item
}

type Item struct {
	SKU string
}
"#,
        )
        .write(
            "repository/repository.go",
            r#"package repository

import "github.com/acme/shop/model"

type Repository interface {
	Save(o *model.Order) error
}

type OrderRepository struct {
	rows []model.Order
}

func NewOrderRepository() *OrderRepository {
	return &OrderRepository{}
}

func (r *OrderRepository) Save(o *model.Order) error {
	r.rows = append(r.rows, *o)
	return nil
}
"#,
        )
        .write(
            "service/service.go",
            r#"package service

import (
	"github.com/acme/shop/model"
	"github.com/acme/shop/repository"
)

type OrderService struct {
	repo *repository.OrderRepository
}

func (s *OrderService) Place() error {
	order := &model.Order{ID: "1"}
	return s.repo.Save(order)
}
"#,
        )
        .write(
            "service/service_test.go",
            r#"package service

type FakeService struct {
	calls int
}
"#,
        )
}
